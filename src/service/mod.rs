pub mod auth;
pub mod lifecycle;
