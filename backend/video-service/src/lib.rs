pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;
