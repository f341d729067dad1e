use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 管理员登录请求 (共享密钥)
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AdminLoginRequest {
    pub key: String,
}
