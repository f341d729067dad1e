use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use luckywheel_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::{SessionMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // 创建服务
    let session_service = SessionService::new(&config.session);
    let player_service = PlayerService::new(pool.clone());
    let prize_service = PrizeService::new(pool.clone());
    let wheel_service = WheelService::new(pool.clone());

    // 玩家表为空时批量生成账号 (QR 登录从中分配)
    match player_service
        .seed_players(config.seed.player_count, config.seed.default_spins_per_day)
        .await
    {
        Ok(0) => {}
        Ok(n) => log::info!("Seeded {n} player accounts"),
        Err(e) => log::error!("Failed to seed players: {e:?}"),
    }

    // 启动后台定时任务: 每 10 分钟清理过期会话
    {
        let session_service_clone = session_service.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(std::time::Duration::from_secs(600)).await;
                let removed = session_service_clone.purge_expired();
                if removed > 0 {
                    log::info!("Purged {removed} expired sessions");
                }
            }
        });
    }

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    let server_host = config.server.host.clone();
    let server_port = config.server.port;
    let admin_key = config.admin.key.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(SessionMiddleware::new(
                session_service.clone(),
                admin_key.clone(),
            ))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(session_service.clone()))
            .app_data(web::Data::new(player_service.clone()))
            .app_data(web::Data::new(prize_service.clone()))
            .app_data(web::Data::new(wheel_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::auth_config)
                    .configure(handlers::player_config)
                    .configure(handlers::wheel_config)
                    .configure(handlers::admin_config),
            )
    })
    .bind((server_host.as_str(), server_port))?
    .run()
    .await
}
