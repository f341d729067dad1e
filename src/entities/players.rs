use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::quota::{self, QuotaState};

/// 玩家实体 – 用来限制每日抽奖次数
/// 概念说明:
/// - spins_per_day: 每日可抽次数 (0 或负数 = 永不可抽, 不视为错误)
/// - last_spin_date: 最近一次抽奖日期 (NULL = 从未抽过)
/// - spins_used_today: 仅在 last_spin_date 等于今天时有意义, 日期翻转后按 0 计
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: Option<String>,
    pub spins_per_day: i32,
    pub last_spin_date: Option<NaiveDate>,
    pub spins_used_today: i32,
    /// 是否启用
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    pub fn quota_state(&self) -> QuotaState {
        QuotaState {
            spins_per_day: self.spins_per_day,
            last_spin_date: self.last_spin_date,
            spins_used_today: self.spins_used_today,
        }
    }

    /// 今天剩余抽奖次数 (过期计数按日期翻转清零处理)
    pub fn spins_left_on(&self, today: NaiveDate) -> i32 {
        quota::remaining_spins(&self.quota_state(), today)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
