use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::spin_record_entity;
use crate::models::{PaginatedResponse, PrizeResponse};

/// 抽奖 (Spin) 响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SpinResponse {
    /// 中奖奖品
    pub prize: PrizeResponse,
    /// 今天剩余抽奖次数
    pub spins_left_today: i32,
}

/// 抽奖记录查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SpinRecordQuery {
    /// 页码 (默认 1)
    pub page: Option<u32>,
    /// 每页数量 (默认 20)
    pub per_page: Option<u32>,
}

/// 抽奖记录响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SpinRecordResponse {
    pub id: i64,
    pub prize_id: i64,
    /// 奖品名称 (历史快照)
    pub prize_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<spin_record_entity::Model> for SpinRecordResponse {
    fn from(m: spin_record_entity::Model) -> Self {
        SpinRecordResponse {
            id: m.id,
            prize_id: m.prize_id,
            prize_name: m.prize_name,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// 抽奖记录分页响应
pub type SpinRecordPageResponse = PaginatedResponse<SpinRecordResponse>;
