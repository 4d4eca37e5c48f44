pub mod config_loader;
pub mod constants;
pub mod fixed_point;
pub mod token;

pub use config_loader::{ConfigLoader, ConfigLoaderSync, LoadConfigError};
pub use constants::*;
pub use token::{Token, TokenId, TokenWrapper};
