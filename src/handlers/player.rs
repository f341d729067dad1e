use crate::handlers::current_session;
use crate::models::PlayerStatusResponse;
use crate::services::{PlayerService, SessionService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use chrono::Local;
use serde_json::json;

#[utoipa::path(
    get,
    path = "/player/status",
    tag = "player",
    responses(
        (status = 200, description = "当前玩家状态 (未登录时 authenticated = false)", body = PlayerStatusResponse)
    )
)]
/// 告知前端: 是否已登录, 今天还剩几次抽奖
pub async fn get_status(
    players: web::Data<PlayerService>,
    sessions: web::Data<SessionService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let today = Local::now().date_naive();
    let current = current_session(&req);

    let Some(pid) = current.player_id else {
        return Ok(HttpResponse::Ok()
            .json(json!({ "success": true, "data": PlayerStatusResponse::unauthenticated() })));
    };

    match players.get_active_player(pid).await {
        Ok(Some(player)) => Ok(HttpResponse::Ok().json(
            json!({ "success": true, "data": PlayerStatusResponse::authenticated(&player, today) }),
        )),
        Ok(None) => {
            // 会话指向已删除 / 停用账号: 解除绑定, 按未登录处理
            if let Some(token) = &current.token {
                sessions.clear_player(token);
            }
            Ok(HttpResponse::Ok()
                .json(json!({ "success": true, "data": PlayerStatusResponse::unauthenticated() })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn player_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/player").route("/status", web::get().to(get_status)));
}
