pub use boojo_cli::cli;
pub use boojo_cli::commands;
pub use boojo_cli::config;
pub use boojo_cli::logging;
pub use boojo_cli::AppConfig;

pub use boojo_core as core;
pub use boojo_core::model;
pub use boojo_core::parser;
pub use boojo_core::render;
pub use boojo_core::services;
