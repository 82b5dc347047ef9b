pub mod error;
pub mod flights;
