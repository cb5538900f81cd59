pub mod compare;
pub mod init;
pub mod letter;
pub mod process;
pub mod validate;
