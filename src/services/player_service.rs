use crate::entities::player_entity as players;
use crate::error::{AppError, AppResult};
use crate::models::{PaginatedResponse, PaginationParams, PlayerAdminResponse, PlayerListQuery, UpdatePlayerRequest};
use crate::utils::quota;
use chrono::{NaiveDate, Utc};
use rand::seq::SliceRandom;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct PlayerService {
    pool: DatabaseConnection,
}

impl PlayerService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 查启用的玩家 (停用账号视为不存在)
    pub async fn get_active_player(&self, id: i64) -> AppResult<Option<players::Model>> {
        let player = players::Entity::find_by_id(id)
            .filter(players::Column::IsActive.eq(true))
            .one(&self.pool)
            .await?;
        Ok(player)
    }

    /// 随机挑一个今天仍有次数的启用玩家 (QR 自动登录)
    pub async fn pick_available_player(&self, today: NaiveDate) -> AppResult<Option<players::Model>> {
        let list = players::Entity::find()
            .filter(players::Column::IsActive.eq(true))
            .all(&self.pool)
            .await?;

        let available: Vec<players::Model> = list
            .into_iter()
            .filter(|p| quota::can_spin(&p.quota_state(), today))
            .collect();

        let mut rng = rand::thread_rng();
        Ok(available.choose(&mut rng).cloned())
    }

    /// 玩家表为空时批量生成账号, 返回创建数量 (启动时调用一次)
    pub async fn seed_players(&self, count: u32, spins_per_day: i32) -> AppResult<u64> {
        if count == 0 {
            return Ok(0);
        }

        let existing = players::Entity::find().count(&self.pool).await?;
        if existing > 0 {
            return Ok(0);
        }

        let batch: Vec<players::ActiveModel> = (1..=count)
            .map(|i| players::ActiveModel {
                name: Set(Some(format!("Player #{i}"))),
                spins_per_day: Set(spins_per_day),
                spins_used_today: Set(0),
                is_active: Set(true),
                ..Default::default()
            })
            .collect();

        players::Entity::insert_many(batch).exec(&self.pool).await?;
        Ok(u64::from(count))
    }

    /// 玩家列表 (分页, 管理端)
    pub async fn list_players(
        &self,
        query: &PlayerListQuery,
        today: NaiveDate,
    ) -> AppResult<PaginatedResponse<PlayerAdminResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let total = players::Entity::find().count(&self.pool).await? as i64;

        let items = players::Entity::find()
            .order_by_asc(players::Column::Id)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let data: Vec<PlayerAdminResponse> = items
            .into_iter()
            .map(|m| PlayerAdminResponse::from_model(m, today))
            .collect();

        Ok(PaginatedResponse::new(
            data,
            params.page.unwrap_or(1).max(1),
            params.get_limit(),
            total,
        ))
    }

    /// 管理端更新玩家 (名称 / 每日配额 / 启用状态)
    pub async fn update_player(
        &self,
        id: i64,
        request: UpdatePlayerRequest,
        today: NaiveDate,
    ) -> AppResult<PlayerAdminResponse> {
        if request.name.is_none() && request.spins_per_day.is_none() && request.active.is_none() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }
        if let Some(name) = &request.name
            && name.len() > 100
        {
            return Err(AppError::ValidationError(
                "Player name must be at most 100 characters".to_string(),
            ));
        }

        let player = players::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Player not found".to_string()))?;

        let mut am = player.into_active_model();
        if let Some(name) = request.name {
            am.name = Set(Some(name));
        }
        if let Some(n) = request.spins_per_day {
            // 0 或负数 = 永不可抽, 合法配置
            am.spins_per_day = Set(n);
        }
        if let Some(active) = request.active {
            am.is_active = Set(active);
        }
        am.updated_at = Set(Some(Utc::now()));

        let updated = am.update(&self.pool).await?;
        Ok(PlayerAdminResponse::from_model(updated, today))
    }
}
