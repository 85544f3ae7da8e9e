pub mod config;
pub mod error;
pub mod loader;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
pub use services::{run, run_with, RunReport};
