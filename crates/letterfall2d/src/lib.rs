#![allow(clippy::too_many_arguments)]

pub mod config;
pub mod drag;
pub mod error;
pub mod loader;
pub mod palette;
pub mod scheduler;
pub mod world;

pub use config::RainConfig;
pub use drag::DragController;
pub use error::Error;
pub use palette::{Color, Palette};
pub use scheduler::{SchedulerState, SpawnJob, SpawnScheduler};
pub use world::{PhysicsWorld, Viewport};
