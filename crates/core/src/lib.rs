pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod parser;
pub mod render;
pub mod services;
pub mod sort;
pub mod style;
pub mod summary;

pub use config::AppConfig;
pub use error::ConfigError;
pub use model::*;
pub use render::RenderOptions;
pub use services::{run_listing, LedgerService, ListingSnapshot};
pub use style::{Palette, Tone};
