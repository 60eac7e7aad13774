use crate::database::Database;
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

pub async fn health(db: web::Data<Arc<Database>>) -> impl Responder {
    match db.async_connection.lock().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "connected"
        })),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "status": "unhealthy",
                "database": "disconnected"
            }))
        }
    }
}
