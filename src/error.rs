use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Player not found")]
    PlayerNotFound,

    #[error("Daily spin quota reached")]
    QuotaExceeded,

    #[error("No eligible prize configured")]
    NoEligiblePrize,

    #[error("Unauthorized: admin login required")]
    UnauthorizedAdmin,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::NotAuthenticated => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "NOT_AUTHENTICATED",
                "Not logged in (scan the QR code to play)".to_string(),
            ),
            AppError::PlayerNotFound => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "PLAYER_NOT_FOUND",
                "Player account is missing or deactivated".to_string(),
            ),
            AppError::QuotaExceeded => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "QUOTA_EXCEEDED",
                "No spins left today, come back tomorrow".to_string(),
            ),
            AppError::NoEligiblePrize => {
                // 配置错误: 没有任何启用且权重为正的奖品
                log::error!("Spin failed: no active prize with positive weight");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "NO_ELIGIBLE_PRIZE",
                    "No eligible prize configured".to_string(),
                )
            }
            AppError::UnauthorizedAdmin => {
                log::warn!("Admin action without valid session or key");
                (
                    actix_web::http::StatusCode::UNAUTHORIZED,
                    "UNAUTHORIZED_ADMIN",
                    "Unauthorized: admin login required".to_string(),
                )
            }
            AppError::NotFound(msg) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                msg.clone(),
            ),
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Database error".to_string(),
                )
            }
            _ => {
                log::error!("Internal error: {self}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        }))
    }
}
