use crate::config::Config;
use crate::error::AppError;
use crate::handlers::current_session;
use crate::models::{
    AdminLoginRequest, CreatePrizeRequest, PlayerAdminResponse, PlayerListQuery, PrizeResponse,
    UpdatePlayerRequest, UpdatePrizeRequest,
};
use crate::models::PaginatedResponse;
use crate::services::{PlayerService, PrizeService, SessionService};
use crate::utils::verify_admin_key;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use chrono::Local;
use serde_json::json;

#[utoipa::path(
    post,
    path = "/admin/login",
    tag = "admin",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "登录成功, 会话获得管理员标记"),
        (status = 400, description = "未提交密钥"),
        (status = 401, description = "密钥错误")
    )
)]
/// 管理员登录: 提交的密钥与配置的共享密钥做常数时间比较
pub async fn login(
    config: web::Data<Config>,
    sessions: web::Data<SessionService>,
    body: web::Json<AdminLoginRequest>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let key = body.key.trim();
    if key.is_empty() {
        return Ok(
            AppError::ValidationError("Admin key is required".to_string()).error_response()
        );
    }

    let current = current_session(&req);

    if !verify_admin_key(&config.admin.key, key) {
        // 密钥错误时顺手清除已有的管理员标记
        if let Some(token) = &current.token {
            sessions.set_admin(token, false);
        }
        return Ok(AppError::UnauthorizedAdmin.error_response());
    }

    let token = current.token.unwrap_or_else(|| sessions.create());
    sessions.set_admin(&token, true);
    let cookie = sessions.build_cookie(&token);

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "success": true })))
}

#[utoipa::path(
    post,
    path = "/admin/logout",
    tag = "admin",
    responses(
        (status = 200, description = "登出成功 (无会话也返回成功)")
    )
)]
/// 清除会话的管理员标记
pub async fn logout(sessions: web::Data<SessionService>, req: HttpRequest) -> Result<HttpResponse> {
    let current = current_session(&req);
    if let Some(token) = &current.token {
        sessions.set_admin(token, false);
    }
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[utoipa::path(
    get,
    path = "/admin/prizes",
    tag = "admin",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "全部奖品 (含停用)", body = [PrizeResponse]),
        (status = 401, description = "未授权")
    )
)]
/// 管理端奖品列表
pub async fn list_prizes(service: web::Data<PrizeService>) -> Result<HttpResponse> {
    match service.list_prizes(false).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/prizes",
    tag = "admin",
    request_body = CreatePrizeRequest,
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 201, description = "创建成功", body = PrizeResponse),
        (status = 400, description = "参数无效"),
        (status = 401, description = "未授权")
    )
)]
/// 创建奖品
pub async fn create_prize(
    service: web::Data<PrizeService>,
    body: web::Json<CreatePrizeRequest>,
) -> Result<HttpResponse> {
    match service.create_prize(body.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Created().json(json!({ "success": true, "data": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/admin/prizes/{id}",
    tag = "admin",
    request_body = UpdatePrizeRequest,
    params(
        ("id" = i64, Path, description = "奖品ID")
    ),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "更新成功", body = PrizeResponse),
        (status = 401, description = "未授权"),
        (status = 404, description = "奖品不存在")
    )
)]
/// 更新奖品 (PUT / PATCH 等价, 缺省字段不变)
pub async fn update_prize(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
    body: web::Json<UpdatePrizeRequest>,
) -> Result<HttpResponse> {
    match service
        .update_prize(path.into_inner(), body.into_inner())
        .await
    {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/prizes/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "奖品ID")
    ),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "删除成功"),
        (status = 401, description = "未授权"),
        (status = 404, description = "奖品不存在")
    )
)]
/// 删除奖品 (历史抽奖记录保留名称快照)
pub async fn delete_prize(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete_prize(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/players",
    tag = "admin",
    params(
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)")
    ),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "玩家列表 (含当日剩余次数)", body = PaginatedResponse<PlayerAdminResponse>),
        (status = 401, description = "未授权")
    )
)]
/// 分页获取玩家列表
pub async fn list_players(
    service: web::Data<PlayerService>,
    query: web::Query<PlayerListQuery>,
) -> Result<HttpResponse> {
    let today = Local::now().date_naive();
    match service.list_players(&query.into_inner(), today).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/admin/players/{id}",
    tag = "admin",
    request_body = UpdatePlayerRequest,
    params(
        ("id" = i64, Path, description = "玩家ID")
    ),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "更新成功", body = PlayerAdminResponse),
        (status = 401, description = "未授权"),
        (status = 404, description = "玩家不存在")
    )
)]
/// 更新玩家 (名称 / 每日配额 / 启用状态; 配额可以为 0 或负数 = 停抽)
pub async fn update_player(
    service: web::Data<PlayerService>,
    path: web::Path<i64>,
    body: web::Json<UpdatePlayerRequest>,
) -> Result<HttpResponse> {
    let today = Local::now().date_naive();
    match service
        .update_player(path.into_inner(), body.into_inner(), today)
        .await
    {
        Ok(player) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": player }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/prizes", web::get().to(list_prizes))
            .route("/prizes", web::post().to(create_prize))
            .route("/prizes/{id}", web::put().to(update_prize))
            .route("/prizes/{id}", web::patch().to(update_prize))
            .route("/prizes/{id}", web::delete().to(delete_prize))
            .route("/players", web::get().to(list_players))
            .route("/players/{id}", web::patch().to(update_player)),
    );
}
