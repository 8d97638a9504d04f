// Coin API library entry, shared by the binary and the integration tests

pub mod api_error;
pub mod api_types;
pub mod cache;
pub mod coingecko;
pub mod config;
pub mod consts;
pub mod demo;
pub mod handlers;
pub mod init;
pub mod key;
pub mod normalize;
pub mod server;
pub mod service;
