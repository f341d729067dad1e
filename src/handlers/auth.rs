use crate::error::AppError;
use crate::handlers::current_session;
use crate::models::{AutoLoginResponse, PlayerBrief};
use crate::services::{PlayerService, SessionService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use chrono::Local;
use serde_json::json;

#[utoipa::path(
    post,
    path = "/auth/auto-login",
    tag = "auth",
    responses(
        (status = 200, description = "登录成功 (复用已有绑定或分配新账号)", body = AutoLoginResponse),
        (status = 400, description = "今天已没有可用账号")
    )
)]
/// QR 落地自动登录:
/// 1. 会话已绑定有效玩家 → 直接复用 (剩余 0 次也复用, 由前端提示)
/// 2. 否则随机分配一个今天仍有次数的启用玩家并绑定到会话
pub async fn auto_login(
    players: web::Data<PlayerService>,
    sessions: web::Data<SessionService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let today = Local::now().date_naive();
    let current = current_session(&req);

    if let Some(pid) = current.player_id {
        match players.get_active_player(pid).await {
            Ok(Some(player)) => {
                let body = AutoLoginResponse {
                    spins_left_today: player.spins_left_on(today),
                    player: PlayerBrief::from(&player),
                };
                return Ok(HttpResponse::Ok().json(json!({ "success": true, "data": body })));
            }
            Ok(None) => {
                // 绑定的账号已删除 / 停用: 解除绑定后重新分配
                if let Some(token) = &current.token {
                    sessions.clear_player(token);
                }
            }
            Err(e) => return Ok(e.error_response()),
        }
    }

    let chosen = match players.pick_available_player(today).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return Ok(AppError::ValidationError(
                "No player account with spins left today, come back tomorrow".to_string(),
            )
            .error_response());
        }
        Err(e) => return Ok(e.error_response()),
    };

    let token = current.token.unwrap_or_else(|| sessions.create());
    sessions.bind_player(&token, chosen.id);
    let cookie = sessions.build_cookie(&token);

    let body = AutoLoginResponse {
        spins_left_today: chosen.spins_left_on(today),
        player: PlayerBrief::from(&chosen),
    };
    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "success": true, "data": body })))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "登出成功 (无会话也返回成功)")
    )
)]
/// 解除当前会话的玩家绑定
pub async fn logout(sessions: web::Data<SessionService>, req: HttpRequest) -> Result<HttpResponse> {
    let current = current_session(&req);
    if let Some(token) = &current.token {
        sessions.clear_player(token);
    }
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// 路由配置
pub fn auth_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/auto-login", web::post().to(auto_login))
            .route("/logout", web::post().to(logout)),
    );
}
