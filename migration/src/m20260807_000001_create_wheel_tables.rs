use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;

/// Players (玩家表)
/// - spins_per_day: 每日可抽次数 (管理员可改为 0 或负数 = 永不可抽)
/// - last_spin_date: 最近一次抽奖的日期 (NULL = 从未抽过)
/// - spins_used_today: last_spin_date 当天已用次数, 日期翻转后视为 0
#[derive(DeriveIden)]
enum Players {
    Table,
    Id,
    Name,
    SpinsPerDay,
    LastSpinDate,
    SpinsUsedToday,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

/// Prizes (奖品配置表)
/// - weight: 相对权重, 中奖概率 = weight / sum(weights)
#[derive(DeriveIden)]
enum Prizes {
    Table,
    Id,
    Name,
    Weight,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

/// Spin Records (抽奖记录, 奖品名称做历史快照)
#[derive(DeriveIden)]
enum SpinRecords {
    Table,
    Id,
    PlayerId,
    PrizeId,
    PrizeName,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 奖品初始配置 (权重为相对值, 总和 100):
/// - 100K 现金券 10
/// - Arrow Gift 8
/// - 1M 现金券 1
/// - Voucher 6
/// - 500K 现金券 3
/// - Gift Box 7
/// - Thank You (谢谢参与) 50
/// - 200K 现金券 15
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 玩家表
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Players::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Players::Name).string_len(100).null())
                    .col(
                        ColumnDef::new(Players::SpinsPerDay)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Players::LastSpinDate).date().null())
                    .col(
                        ColumnDef::new(Players::SpinsUsedToday)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Players::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Players::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Players::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 奖品表
        manager
            .create_table(
                Table::create()
                    .table(Prizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prizes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prizes::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Prizes::Weight)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Prizes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Prizes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Prizes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 奖品名唯一 (seed 时 ON CONFLICT 依赖)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prizes_name_unique")
                    .table(Prizes::Table)
                    .col(Prizes::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 抽奖记录表
        manager
            .create_table(
                Table::create()
                    .table(SpinRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SpinRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SpinRecords::PlayerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SpinRecords::PrizeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SpinRecords::PrizeName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SpinRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 玩家查询记录索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_spin_records_player")
                    .table(SpinRecords::Table)
                    .col(SpinRecords::PlayerId)
                    .to_owned(),
            )
            .await?;

        // 外键 (不加 ON DELETE CASCADE, 奖品删除后历史记录仍然存在快照)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_spin_records_prize")
                    .table(SpinRecords::Table)
                    .col(SpinRecords::PrizeId)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(SpinRecords::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_spin_record_player")
                            .from_tbl(SpinRecords::Table)
                            .from_col(SpinRecords::PlayerId)
                            .to_tbl(Players::Table)
                            .to_col(Players::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 初始化奖品数据 (权重总和 100, "Thank You" 为未中奖项)
        let conn = manager.get_connection();
        let insert_sql = r#"
INSERT INTO prizes (name, weight, is_active)
VALUES
 ('100K', 10, TRUE),
 ('Arrow Gift', 8, TRUE),
 ('1M', 1, TRUE),
 ('Voucher', 6, TRUE),
 ('500K', 3, TRUE),
 ('Gift Box', 7, TRUE),
 ('Thank You', 50, TRUE),
 ('200K', 15, TRUE)
ON CONFLICT (name) DO NOTHING;
"#;
        conn.execute(Statement::from_string(
            manager.get_database_backend(),
            insert_sql.to_string(),
        ))
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序: 记录 -> 玩家 -> 奖品
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(SpinRecords::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Players::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Prizes::Table).to_owned())
            .await?;

        Ok(())
    }
}
