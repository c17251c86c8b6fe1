//! CLI command implementations

pub mod board;
pub mod catalog;
pub mod init;
pub mod resolve;
pub mod validate;
