use crate::error::AppError;
use crate::handlers::current_session;
use crate::models::{PrizeListQuery, SpinRecordQuery, SpinRecordResponse, SpinResponse};
use crate::models::{PaginatedResponse, PrizeResponse};
use crate::services::{PrizeService, WheelService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use chrono::Local;
use serde_json::json;

#[utoipa::path(
    get,
    path = "/wheel/prizes",
    tag = "wheel",
    params(
        ("active_only" = Option<u8>, Query, description = "传 1 时仅返回启用的奖品")
    ),
    responses(
        (status = 200, description = "奖品列表 (按 id 排序)", body = [PrizeResponse])
    )
)]
/// 公开奖品列表 (转盘渲染用)
pub async fn get_prizes(
    service: web::Data<PrizeService>,
    query: web::Query<PrizeListQuery>,
) -> Result<HttpResponse> {
    match service.list_prizes(query.active_only()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/wheel/spin",
    tag = "wheel",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "抽奖成功", body = SpinResponse),
        (status = 400, description = "配额用尽或账号无效"),
        (status = 401, description = "未登录"),
        (status = 500, description = "无可抽奖品 (配置错误)")
    )
)]
/// 进行一次抽奖:
/// 1. 会话必须绑定玩家
/// 2. 占用一个当日配额名额 (并发安全)
/// 3. 按权重随机抽取奖品并记录
pub async fn spin(service: web::Data<WheelService>, req: HttpRequest) -> Result<HttpResponse> {
    let current = current_session(&req);
    let Some(player_id) = current.player_id else {
        return Ok(AppError::NotAuthenticated.error_response());
    };

    let today = Local::now().date_naive();
    match service.spin(player_id, today).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/wheel/records",
    tag = "wheel",
    params(
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)")
    ),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "当前玩家的抽奖记录 (倒序)", body = PaginatedResponse<SpinRecordResponse>),
        (status = 401, description = "未登录")
    )
)]
/// 分页获取当前玩家的抽奖记录
pub async fn get_records(
    service: web::Data<WheelService>,
    req: HttpRequest,
    query: web::Query<SpinRecordQuery>,
) -> Result<HttpResponse> {
    let current = current_session(&req);
    let Some(player_id) = current.player_id else {
        return Ok(AppError::NotAuthenticated.error_response());
    };

    match service.list_records(player_id, &query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn wheel_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/wheel")
            .route("/prizes", web::get().to(get_prizes))
            .route("/spin", web::post().to(spin))
            .route("/records", web::get().to(get_records)),
    );
}
