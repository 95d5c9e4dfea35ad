pub mod file;
pub mod memory;
pub mod session_repository;
pub mod user_repository;
