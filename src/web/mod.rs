pub mod api;
pub mod api_doc;
pub mod config;
pub mod frontend;
pub mod server;

pub use config::Config;
pub use server::{run_server, ServerError};
