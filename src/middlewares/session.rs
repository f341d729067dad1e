use crate::error::AppError;
use crate::services::SessionService;
use crate::utils::verify_admin_key;
use actix_web::http::Method;
use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

/// 中间件解析 cookie 后注入请求扩展的会话视图。
/// token 仅在会话有效时为 Some; 未带 cookie / 已过期时是全默认值。
#[derive(Debug, Clone, Default)]
pub struct CurrentSession {
    pub token: Option<String>,
    pub player_id: Option<i64>,
    pub is_admin: bool,
}

// 管理端路径配置
struct AdminPaths {
    prefix: &'static str,
    exempt_paths: Vec<&'static str>,
}

impl AdminPaths {
    fn new() -> Self {
        Self {
            prefix: "/api/v1/admin/",
            // 登录 / 登出本身不要求管理员身份
            exempt_paths: vec!["/api/v1/admin/login", "/api/v1/admin/logout"],
        }
    }

    fn requires_admin(&self, path: &str) -> bool {
        if self.exempt_paths.iter().any(|&exempt| path == exempt) {
            return false;
        }
        path.starts_with(self.prefix)
    }
}

pub struct SessionMiddleware {
    sessions: SessionService,
    admin_key: String,
}

impl SessionMiddleware {
    /// admin_key 来自配置注入, 不读全局状态
    pub fn new(sessions: SessionService, admin_key: String) -> Self {
        Self { sessions, admin_key }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service,
            sessions: self.sessions.clone(),
            admin_key: self.admin_key.clone(),
            admin_paths: AdminPaths::new(),
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: S,
    sessions: SessionService,
    admin_key: String,
    admin_paths: AdminPaths,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // 放行所有 CORS 预检请求
        if req.method() == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        // cookie -> 会话快照
        let token = req
            .cookie(self.sessions.cookie_name())
            .map(|c| c.value().to_string());

        let current = match token.and_then(|t| self.sessions.get(&t).map(|data| (t, data))) {
            Some((token, data)) => CurrentSession {
                token: Some(token),
                player_id: data.player_id,
                is_admin: data.is_admin,
            },
            None => CurrentSession::default(),
        };

        // 管理端守卫: 会话管理员标记, 或请求头携带正确的 X-Admin-Key (调试工具用)
        if self.admin_paths.requires_admin(req.path()) && !current.is_admin {
            let header_ok = req
                .headers()
                .get("X-Admin-Key")
                .and_then(|v| v.to_str().ok())
                .map(|key| verify_admin_key(&self.admin_key, key))
                .unwrap_or(false);

            if !header_ok {
                let error = AppError::UnauthorizedAdmin;
                return Box::pin(async move { Err(error.into()) });
            }
        }

        req.extensions_mut().insert(current);
        let fut = self.service.call(req);
        Box::pin(fut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_paths() {
        let paths = AdminPaths::new();
        assert!(paths.requires_admin("/api/v1/admin/prizes"));
        assert!(paths.requires_admin("/api/v1/admin/players/3"));
        assert!(!paths.requires_admin("/api/v1/admin/login"));
        assert!(!paths.requires_admin("/api/v1/admin/logout"));
        assert!(!paths.requires_admin("/api/v1/wheel/spin"));
        assert!(!paths.requires_admin("/api/v1/player/status"));
    }
}
