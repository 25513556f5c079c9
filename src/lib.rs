//! ConnectPulse: professional networking directory service.

pub mod browse;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod directory;
pub mod error;
pub mod server;
pub mod wizard;
