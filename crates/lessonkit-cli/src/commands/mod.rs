pub mod init;
pub mod play;
pub mod resources;
pub mod validate;
