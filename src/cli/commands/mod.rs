/// Configuration inspection commands
pub mod config;
/// Video wall commands
pub mod wall;
