pub mod client;
pub mod clock;
pub mod config;
pub mod contract;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod telemetry;
