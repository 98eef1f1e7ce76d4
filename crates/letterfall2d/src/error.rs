//! Error types for the letterfall core crate.

use thiserror::Error;

/// Failures a glyph load can hit between the HTTP fetch and the world
/// insertion. Callers at the spawn boundary are expected to log and skip
/// rather than abort the session.
#[derive(Debug, Error)]
pub enum Error {
    /// The asset fetch did not succeed.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The fetched text is not a well-formed SVG document.
    #[error("failed to parse svg: {0}")]
    Parse(#[from] svg_to_collider::SvgError),

    /// A configuration file could not be read or deserialized.
    #[error("invalid config {path}: {reason}")]
    Config { path: String, reason: String },
}
