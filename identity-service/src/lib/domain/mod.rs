pub mod access;
pub mod user;
