pub mod context;
pub mod errors;
pub mod events;
pub mod models;
pub mod ports;
pub mod service;
