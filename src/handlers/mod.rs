pub mod admin;
pub mod auth;
pub mod player;
pub mod wheel;

pub use admin::admin_config;
pub use auth::auth_config;
pub use player::player_config;
pub use wheel::wheel_config;

use crate::middlewares::CurrentSession;
use actix_web::{HttpMessage, HttpRequest};

/// 从请求扩展中获取会话视图 (中间件在解析 cookie 后注入)
pub(crate) fn current_session(req: &HttpRequest) -> CurrentSession {
    req.extensions()
        .get::<CurrentSession>()
        .cloned()
        .unwrap_or_default()
}
