//! HTTP server implementation
//!
//! Exposes the routing API (`/route-request`) and the status API
//! (`/provider-status/{id}`, `/providers`, `/health`, `/stats`).

pub mod routes;
pub mod server;
pub mod state;


pub use server::HttpServer;
pub use state::AppState;
