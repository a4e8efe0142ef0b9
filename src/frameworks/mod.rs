// Frameworks layer: bootstrap, configuration, and host infrastructure.

pub mod config;
pub mod host;
pub mod server;
