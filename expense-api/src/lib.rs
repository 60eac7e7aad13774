pub mod config;
pub mod database;
pub mod handlers;
pub mod mcp;

pub use database::Database;
pub use mcp::McpServer;

use actix_web::web;

/// Registers the HTTP routes of the tool gateway
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health::health))
        .route("/mcp", web::post().to(handlers::mcp::handle_mcp))
        .route("/mcp", web::get().to(handlers::mcp::stream_not_supported));
}
