//! CLI command implementations

pub mod export;
pub mod init;
pub mod serve;
pub mod validate;
