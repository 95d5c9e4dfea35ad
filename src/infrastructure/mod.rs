pub mod config;
pub mod debounce;
pub mod logging;
pub mod security;
