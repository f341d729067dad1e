use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::config::SessionConfig;

/// 会话数据快照 (玩家绑定与管理员标记)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionData {
    pub player_id: Option<i64>,
    pub is_admin: bool,
}

#[derive(Debug, Clone)]
struct SessionEntry {
    data: SessionData,
    expires_at: DateTime<Utc>,
}

/// 内存会话存储: token -> 会话数据, 创建时刻起固定 TTL。
/// 独立于持久层, 进程重启即全部失效。
/// 锁只在同步代码段内短暂持有, 不跨 await。
#[derive(Clone)]
pub struct SessionService {
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    ttl: Duration,
    cookie_name: String,
}

impl SessionService {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::seconds(config.ttl_seconds),
            cookie_name: config.cookie_name.clone(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// 新建会话, 返回 token
    pub fn create(&self) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let entry = SessionEntry {
            data: SessionData::default(),
            expires_at: Utc::now() + self.ttl,
        };
        self.sessions
            .write()
            .expect("session lock poisoned")
            .insert(token.clone(), entry);
        token
    }

    /// 读取会话快照; 已过期的条目顺手移除
    pub fn get(&self, token: &str) -> Option<SessionData> {
        let now = Utc::now();
        {
            let map = self.sessions.read().expect("session lock poisoned");
            match map.get(token) {
                None => return None,
                Some(e) if e.expires_at > now => return Some(e.data),
                Some(_) => {}
            }
        }
        self.sessions
            .write()
            .expect("session lock poisoned")
            .remove(token);
        None
    }

    fn with_entry<F>(&self, token: &str, f: F) -> bool
    where
        F: FnOnce(&mut SessionData),
    {
        let now = Utc::now();
        let mut map = self.sessions.write().expect("session lock poisoned");
        match map.get_mut(token) {
            Some(e) if e.expires_at > now => {
                f(&mut e.data);
                true
            }
            _ => false,
        }
    }

    /// 把玩家绑定到会话 (QR 登录)
    pub fn bind_player(&self, token: &str, player_id: i64) -> bool {
        self.with_entry(token, |d| d.player_id = Some(player_id))
    }

    /// 解除玩家绑定 (登出 / 绑定失效)
    pub fn clear_player(&self, token: &str) -> bool {
        self.with_entry(token, |d| d.player_id = None)
    }

    /// 设置 / 清除管理员标记
    pub fn set_admin(&self, token: &str, is_admin: bool) -> bool {
        self.with_entry(token, |d| d.is_admin = is_admin)
    }

    /// 移除全部过期会话, 返回移除数量 (后台任务周期调用)
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut map = self.sessions.write().expect("session lock poisoned");
        let before = map.len();
        map.retain(|_, e| e.expires_at > now);
        before - map.len()
    }

    /// 会话 cookie (HttpOnly, 与 TTL 同寿命)
    pub fn build_cookie(&self, token: &str) -> Cookie<'static> {
        Cookie::build(self.cookie_name.clone(), token.to_string())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(CookieDuration::seconds(self.ttl.num_seconds()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(ttl_seconds: i64) -> SessionService {
        SessionService::new(&SessionConfig {
            ttl_seconds,
            cookie_name: "test_session".to_string(),
        })
    }

    #[test]
    fn test_create_bind_and_get() {
        let svc = service(3600);
        let token = svc.create();

        let data = svc.get(&token).unwrap();
        assert_eq!(data.player_id, None);
        assert!(!data.is_admin);

        assert!(svc.bind_player(&token, 42));
        assert!(svc.set_admin(&token, true));
        let data = svc.get(&token).unwrap();
        assert_eq!(data.player_id, Some(42));
        assert!(data.is_admin);

        assert!(svc.clear_player(&token));
        assert_eq!(svc.get(&token).unwrap().player_id, None);
    }

    #[test]
    fn test_unknown_token_is_none() {
        let svc = service(3600);
        assert!(svc.get("no-such-token").is_none());
        assert!(!svc.bind_player("no-such-token", 1));
    }

    #[test]
    fn test_expired_session_is_gone() {
        // TTL 0 → 创建即过期
        let svc = service(0);
        let token = svc.create();
        assert!(svc.get(&token).is_none());
        assert!(!svc.set_admin(&token, true));
    }

    #[test]
    fn test_purge_expired_counts() {
        let expired = service(0);
        expired.create();
        expired.create();
        assert_eq!(expired.purge_expired(), 2);
        assert_eq!(expired.purge_expired(), 0);

        let live = service(3600);
        live.create();
        assert_eq!(live.purge_expired(), 0);
    }
}
