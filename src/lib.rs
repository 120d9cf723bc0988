pub mod config;
pub mod error;
pub mod session;
pub mod services;
pub mod api;

pub use config::Config;
pub use error::{ AppError, Result };
