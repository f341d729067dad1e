use crate::entities::{
    player_entity as players, prize_entity as prizes, spin_record_entity as records,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    PaginatedResponse, PaginationParams, SpinRecordPageResponse, SpinRecordQuery,
    SpinRecordResponse, SpinResponse,
};
use crate::utils::{quota, weighted};
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, EntityTrait,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
    UpdateResult,
};

#[derive(Clone)]
pub struct WheelService {
    pool: DatabaseConnection,
}

impl WheelService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 抽奖 (Spin)
    ///
    /// 逻辑:
    /// 1. 读取启用玩家, 不存在 / 停用即失败
    /// 2. 占用一个当日配额名额 (条件 UPDATE, 并发竞争时重试)
    /// 3. 读取启用且正权重的奖品, 按权重随机抽取
    /// 4. 写抽奖记录 (奖品名称快照)
    /// 5. 提交事务, 返回奖品与剩余次数
    ///
    /// 配额扣减与抽奖在同一事务内: 第 3/4 步任何失败都会回滚, 不产生半扣状态。
    pub async fn spin(&self, player_id: i64, today: NaiveDate) -> AppResult<SpinResponse> {
        let txn = self.pool.begin().await?;

        let mut player = players::Entity::find_by_id(player_id)
            .filter(players::Column::IsActive.eq(true))
            .one(&txn)
            .await?
            .ok_or(AppError::PlayerNotFound)?;

        let spins_left = self.secure_spin_slot(&txn, &mut player, today).await?;

        // 奖品池: 启用且权重为正, 保持 id 顺序 (累计权重遍历依赖稳定顺序)
        let prize_list = prizes::Entity::find()
            .filter(prizes::Column::IsActive.eq(true))
            .filter(prizes::Column::Weight.gt(0))
            .order_by_asc(prizes::Column::Id)
            .all(&txn)
            .await?;

        let chosen = {
            let mut rng = rand::thread_rng();
            weighted::choose_prize(&prize_list, &mut rng).cloned()
        }
        .ok_or(AppError::NoEligiblePrize)?;

        records::ActiveModel {
            player_id: Set(player.id),
            prize_id: Set(chosen.id),
            prize_name: Set(chosen.name.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        log::info!(
            "Player {} won prize {} ({}), {} spins left today",
            player.id,
            chosen.id,
            chosen.name,
            spins_left
        );

        Ok(SpinResponse {
            prize: chosen.into(),
            spins_left_today: spins_left,
        })
    }

    /// 抽奖记录 (分页, 倒序)
    pub async fn list_records(
        &self,
        player_id: i64,
        query: &SpinRecordQuery,
    ) -> AppResult<SpinRecordPageResponse> {
        let params = PaginationParams::new(query.page, query.per_page);

        let base_query = records::Entity::find().filter(records::Column::PlayerId.eq(player_id));

        let total = base_query.clone().count(&self.pool).await? as i64;

        let items = base_query
            .order_by(records::Column::CreatedAt, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let data: Vec<SpinRecordResponse> = items.into_iter().map(Into::into).collect();

        Ok(PaginatedResponse::new(
            data,
            params.page.unwrap_or(1).max(1),
            params.get_limit(),
            total,
        ))
    }

    // -----------------------------
    // 内部辅助方法
    // -----------------------------

    /// 占用一个当日名额, 返回占用后的剩余次数。
    ///
    /// 检查-翻转-累加对同一玩家必须原子执行: 条件 UPDATE 以读到的
    /// (last_spin_date, spins_used_today) 作守卫, rows_affected == 0
    /// 说明另一请求先落库, 重读最新状态再试 (最多 5 次)。
    /// 不同玩家各自更新自己的行, 互不阻塞。
    async fn secure_spin_slot(
        &self,
        txn: &DatabaseTransaction,
        player: &mut players::Model,
        today: NaiveDate,
    ) -> AppResult<i32> {
        let mut attempts = 0;

        while attempts < 5 {
            attempts += 1;

            let state = player.quota_state();
            let (next, granted) = quota::record_spin(&state, today);
            if !granted {
                return Err(AppError::QuotaExceeded);
            }

            let mut guard = Condition::all()
                .add(players::Column::Id.eq(player.id))
                .add(players::Column::SpinsUsedToday.eq(state.spins_used_today));
            guard = match state.last_spin_date {
                Some(d) => guard.add(players::Column::LastSpinDate.eq(d)),
                None => guard.add(players::Column::LastSpinDate.is_null()),
            };

            let result: UpdateResult = players::Entity::update_many()
                .col_expr(players::Column::LastSpinDate, Expr::value(today))
                .col_expr(
                    players::Column::SpinsUsedToday,
                    Expr::value(next.spins_used_today),
                )
                .col_expr(players::Column::UpdatedAt, Expr::value(Utc::now()))
                .filter(guard)
                .exec(txn)
                .await?;

            if result.rows_affected == 1 {
                player.last_spin_date = next.last_spin_date;
                player.spins_used_today = next.spins_used_today;
                return Ok(quota::remaining_spins(&next, today));
            }

            // 守卫没命中 - 并发请求抢先更新了这一行, 重读后重算
            let refreshed = players::Entity::find_by_id(player.id)
                .filter(players::Column::IsActive.eq(true))
                .one(txn)
                .await?
                .ok_or(AppError::PlayerNotFound)?;
            *player = refreshed;
        }

        Err(AppError::InternalError(
            "Failed to secure a spin slot after several attempts".to_string(),
        ))
    }
}
