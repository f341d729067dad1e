use crate::entities::prize_entity as prizes;
use crate::error::{AppError, AppResult};
use crate::models::{CreatePrizeRequest, PrizeResponse, UpdatePrizeRequest};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

#[derive(Clone)]
pub struct PrizeService {
    pool: DatabaseConnection,
}

impl PrizeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 奖品列表 (按 id 排序; active_only 时只含启用项)
    pub async fn list_prizes(&self, active_only: bool) -> AppResult<Vec<PrizeResponse>> {
        let mut query = prizes::Entity::find();
        if active_only {
            query = query.filter(prizes::Column::IsActive.eq(true));
        }
        let list = query
            .order_by_asc(prizes::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 创建奖品 (name 必填; weight 缺省 1; active 缺省 true)
    pub async fn create_prize(&self, request: CreatePrizeRequest) -> AppResult<PrizeResponse> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationError("Prize name is required".to_string()));
        }
        if name.len() > 100 {
            return Err(AppError::ValidationError(
                "Prize name must be at most 100 characters".to_string(),
            ));
        }

        let model = prizes::ActiveModel {
            name: Set(name),
            weight: Set(request.weight.unwrap_or(1)),
            is_active: Set(request.active.unwrap_or(true)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(model.into())
    }

    /// 更新奖品 (缺省字段不变)
    pub async fn update_prize(&self, id: i64, request: UpdatePrizeRequest) -> AppResult<PrizeResponse> {
        let prize = prizes::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Prize not found".to_string()))?;

        let mut am = prize.into_active_model();
        if let Some(name) = request.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::ValidationError("Prize name is required".to_string()));
            }
            if name.len() > 100 {
                return Err(AppError::ValidationError(
                    "Prize name must be at most 100 characters".to_string(),
                ));
            }
            am.name = Set(name);
        }
        if let Some(weight) = request.weight {
            // 非正权重合法, 表示不参与抽奖
            am.weight = Set(weight);
        }
        if let Some(active) = request.active {
            am.is_active = Set(active);
        }
        am.updated_at = Set(Some(Utc::now()));

        let updated = am.update(&self.pool).await?;
        Ok(updated.into())
    }

    /// 删除奖品 (历史记录保留名称快照, 不受影响)
    pub async fn delete_prize(&self, id: i64) -> AppResult<()> {
        let result = prizes::Entity::delete_by_id(id).exec(&self.pool).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Prize not found".to_string()));
        }
        Ok(())
    }
}
