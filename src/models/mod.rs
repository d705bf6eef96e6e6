pub mod account;
pub mod event;
pub mod order;
pub mod session;
