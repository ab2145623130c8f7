pub mod chat;
pub mod config;
pub mod send;

pub use chat::ChatCommand;
pub use config::ConfigCommand;
pub use send::SendCommand;
