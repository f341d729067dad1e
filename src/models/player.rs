use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::player_entity;

/// 玩家简要信息 (公开接口只暴露 id 与名称)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlayerBrief {
    pub id: i64,
    pub name: Option<String>,
}

impl From<&player_entity::Model> for PlayerBrief {
    fn from(m: &player_entity::Model) -> Self {
        PlayerBrief {
            id: m.id,
            name: m.name.clone(),
        }
    }
}

/// 玩家状态响应 (未登录 / 会话失效时 authenticated = false, 不报错)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlayerStatusResponse {
    pub authenticated: bool,
    /// 今天剩余抽奖次数
    pub spins_left_today: i32,
    pub player: Option<PlayerBrief>,
}

impl PlayerStatusResponse {
    pub fn unauthenticated() -> Self {
        PlayerStatusResponse {
            authenticated: false,
            spins_left_today: 0,
            player: None,
        }
    }

    pub fn authenticated(player: &player_entity::Model, today: NaiveDate) -> Self {
        PlayerStatusResponse {
            authenticated: true,
            spins_left_today: player.spins_left_on(today),
            player: Some(PlayerBrief::from(player)),
        }
    }
}

/// QR 自动登录响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AutoLoginResponse {
    pub player: PlayerBrief,
    pub spins_left_today: i32,
}

/// 玩家管理视图 (含配额字段)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlayerAdminResponse {
    pub id: i64,
    pub name: Option<String>,
    pub spins_per_day: i32,
    pub last_spin_date: Option<NaiveDate>,
    pub spins_used_today: i32,
    /// 今天剩余次数 (按日期翻转规则折算)
    pub spins_left_today: i32,
    pub is_active: bool,
}

impl PlayerAdminResponse {
    pub fn from_model(m: player_entity::Model, today: NaiveDate) -> Self {
        let spins_left_today = m.spins_left_on(today);
        PlayerAdminResponse {
            id: m.id,
            name: m.name,
            spins_per_day: m.spins_per_day,
            last_spin_date: m.last_spin_date,
            spins_used_today: m.spins_used_today,
            spins_left_today,
            is_active: m.is_active,
        }
    }
}

/// 更新玩家请求 (缺省字段不变; spins_per_day 可以为 0 或负数 = 停抽)
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdatePlayerRequest {
    pub name: Option<String>,
    pub spins_per_day: Option<i32>,
    pub active: Option<bool>,
}

/// 玩家列表查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PlayerListQuery {
    /// 页码 (默认 1)
    pub page: Option<u32>,
    /// 每页数量 (默认 20)
    pub per_page: Option<u32>,
}
