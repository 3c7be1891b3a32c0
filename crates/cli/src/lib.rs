pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

pub use boojo_core as core;
pub use boojo_core::model;
pub use boojo_core::parser;
pub use boojo_core::services;

pub use boojo_core::AppConfig;
