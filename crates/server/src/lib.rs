pub mod config;
pub mod error;
pub mod request_id;
pub mod routes;
pub mod state;
