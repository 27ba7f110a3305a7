//! Command implementations that touch the file system directly.

pub mod init;
