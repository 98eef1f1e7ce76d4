use axum::{
    extract::Path,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use std::net::SocketAddr;
use tower_http::compression::CompressionLayer;

#[tokio::main]
async fn main() {
    let app = Router::new()
        .route("/", get(serve_index))
        .route("/assets/:name", get(serve_letter))
        .layer(CompressionLayer::new());

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Asset server listening on http://{}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}

async fn serve_index() -> impl IntoResponse {
    Html(
        "<ul>\
         <li><a href=\"/assets/S.svg\">S</a></li>\
         <li><a href=\"/assets/U.svg\">U</a></li>\
         <li><a href=\"/assets/J.svg\">J</a></li>\
         <li><a href=\"/assets/I.svg\">I</a></li>\
         <li><a href=\"/assets/N.svg\">N</a></li>\
         </ul>",
    )
}

// The letters are compiled in so the binary can run from any directory.
async fn serve_letter(Path(name): Path<String>) -> impl IntoResponse {
    let svg = match name.as_str() {
        "S.svg" => include_str!("../../../assets/letters/S.svg"),
        "U.svg" => include_str!("../../../assets/letters/U.svg"),
        "J.svg" => include_str!("../../../assets/letters/J.svg"),
        "I.svg" => include_str!("../../../assets/letters/I.svg"),
        "N.svg" => include_str!("../../../assets/letters/N.svg"),
        _ => return StatusCode::NOT_FOUND.into_response(),
    };

    (
        [(CONTENT_TYPE, HeaderValue::from_static("image/svg+xml"))],
        svg,
    )
        .into_response()
}
