pub mod config;
pub mod error;
pub mod logging;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

pub use config::WindowConfig;
pub use controller::FrameLoop;
pub use error::{SetupError, ShaderError};
pub use model::GameState;
