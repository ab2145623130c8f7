pub mod client;
pub mod commands;
pub mod error;
pub mod output;
pub mod session;

pub use client::ChatClient;
pub use commands::{ChatCommand, ConfigCommand, SendCommand};
pub use error::{CliError, CliResult, ClientError};
pub use output::{OutputFormat, format_time};
pub use session::{ChatSession, PendingTurn};
