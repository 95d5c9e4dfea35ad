pub mod auth;
pub mod feed;
pub mod handlers;
pub mod view;
