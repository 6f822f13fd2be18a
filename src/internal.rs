pub mod range_server;
pub mod range_store;
pub mod session;
pub mod states;
pub mod transfer;
