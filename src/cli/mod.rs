pub mod server;
pub mod token;
