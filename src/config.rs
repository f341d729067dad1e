use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub session: SessionConfig,
    pub admin: AdminConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 会话有效期 (秒), 默认 1 天
    pub ttl_seconds: i64,
    pub cookie_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 86_400,
            cookie_name: "luckywheel_session".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// 管理端共享密钥, 登录与 X-Admin-Key 均与其比对
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// 玩家表为空时批量创建的账号数量
    pub player_count: u32,
    /// 新建玩家的每日默认抽奖次数
    pub default_spins_per_day: i32,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            player_count: 100,
            default_spins_per_day: 1,
        }
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件, 如果不存在则完全依赖环境变量
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                // 有配置文件: 先解析再用环境变量覆盖
                toml::from_str(&config_str).map_err(|e| format!("Failed to parse config: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // 无配置文件: 使用环境变量与默认值构建
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // 数据库 URL 在无配置文件时必须提供
                let database_url = get_env("DATABASE_URL")
                    .ok_or("Missing DATABASE_URL env var and no config.toml found")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    session: SessionConfig {
                        ttl_seconds: get_env_parse("SESSION_TTL_SECONDS", 86_400i64),
                        cookie_name: get_env("SESSION_COOKIE_NAME")
                            .unwrap_or_else(|| "luckywheel_session".to_string()),
                    },
                    admin: AdminConfig {
                        key: get_env("LUCKY_WHEEL_ADMIN_KEY")
                            .unwrap_or_else(|| "changeme_admin_key".to_string()),
                    },
                    seed: SeedConfig {
                        player_count: get_env_parse("SEED_PLAYER_COUNT", 100u32),
                        default_spins_per_day: get_env_parse("SEED_SPINS_PER_DAY", 1i32),
                    },
                }
            }
            Err(e) => {
                return Err(format!("Cannot read config file {config_path}: {e}").into());
            }
        };

        // 环境变量覆盖 (即便文件存在时也覆盖)
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("SESSION_TTL_SECONDS")
            && let Ok(n) = v.parse()
        {
            config.session.ttl_seconds = n;
        }
        if let Ok(v) = env::var("SESSION_COOKIE_NAME") {
            config.session.cookie_name = v;
        }
        if let Ok(v) = env::var("LUCKY_WHEEL_ADMIN_KEY") {
            config.admin.key = v;
        }
        if let Ok(v) = env::var("SEED_PLAYER_COUNT")
            && let Ok(n) = v.parse()
        {
            config.seed.player_count = n;
        }
        if let Ok(v) = env::var("SEED_SPINS_PER_DAY")
            && let Ok(n) = v.parse()
        {
            config.seed.default_spins_per_day = n;
        }

        Ok(config)
    }
}
