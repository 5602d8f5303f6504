pub mod env_file;
pub mod secrets_file;
