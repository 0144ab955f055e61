pub mod contracts;
pub mod search_console_client;

pub use search_console_client::GoogleSearchConsoleClient;
