//! CLI command modules

pub mod init;
pub mod list;
pub mod read;
pub mod render;
pub mod schema;
pub mod validate;
