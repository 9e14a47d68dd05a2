pub mod access_log;
pub mod repositories;
pub mod tokens;
