/// Database configuration and connection management
pub mod database;

/// Application settings loaded from TOML and environment variables
pub mod settings;
