use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::prize_entity;

/// 奖品列表查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PrizeListQuery {
    /// 传 1 时仅返回启用的奖品
    pub active_only: Option<u8>,
}

impl PrizeListQuery {
    pub fn active_only(&self) -> bool {
        self.active_only.unwrap_or(0) != 0
    }
}

/// 奖品信息响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeResponse {
    /// 奖品ID
    pub id: i64,
    /// 展示名称
    pub name: String,
    /// 相对权重
    pub weight: i32,
    /// 是否启用
    pub is_active: bool,
}

impl From<prize_entity::Model> for PrizeResponse {
    fn from(m: prize_entity::Model) -> Self {
        PrizeResponse {
            id: m.id,
            name: m.name,
            weight: m.weight,
            is_active: m.is_active,
        }
    }
}

/// 创建奖品请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreatePrizeRequest {
    pub name: String,
    /// 相对权重, 缺省 1
    pub weight: Option<i32>,
    /// 是否启用, 缺省 true
    pub active: Option<bool>,
}

/// 更新奖品请求 (缺省字段不变)
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdatePrizeRequest {
    pub name: Option<String>,
    pub weight: Option<i32>,
    pub active: Option<bool>,
}
