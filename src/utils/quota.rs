use chrono::NaiveDate;

/// 每日抽奖配额核心逻辑。
/// 纯函数: 数据库里的 (spins_per_day, last_spin_date, spins_used_today)
/// 三元组加上"今天"即可完全决定结果, 持久化与并发控制由 service 层负责。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaState {
    pub spins_per_day: i32,
    pub last_spin_date: Option<NaiveDate>,
    pub spins_used_today: i32,
}

/// 今天剩余抽奖次数。
/// last_spin_date 不是今天时计数器视为过期, 返回全额配额;
/// spins_per_day 为 0 或负数时恒为 0。
pub fn remaining_spins(state: &QuotaState, today: NaiveDate) -> i32 {
    if state.last_spin_date != Some(today) {
        return state.spins_per_day.max(0);
    }
    (state.spins_per_day - state.spins_used_today).max(0)
}

pub fn can_spin(state: &QuotaState, today: NaiveDate) -> bool {
    remaining_spins(state, today) > 0
}

/// 记一次抽奖: 日期翻转先清零计数, 配额用尽则拒绝。
/// 拒绝时返回原状态不变, 重复调用永远拒绝且不再累加。
pub fn record_spin(state: &QuotaState, today: NaiveDate) -> (QuotaState, bool) {
    let mut next = *state;

    if next.last_spin_date != Some(today) {
        next.last_spin_date = Some(today);
        next.spins_used_today = 0;
    }

    if next.spins_used_today >= next.spins_per_day {
        return (*state, false);
    }

    next.spins_used_today += 1;
    (next, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_stale_date_restores_full_quota() {
        let today = date(2026, 8, 7);
        // 昨天已用满, 但日期翻转后按全额计
        let state = QuotaState {
            spins_per_day: 3,
            last_spin_date: Some(date(2026, 8, 6)),
            spins_used_today: 3,
        };
        assert_eq!(remaining_spins(&state, today), 3);
        assert!(can_spin(&state, today));

        // 从未抽过
        let fresh = QuotaState {
            spins_per_day: 1,
            last_spin_date: None,
            spins_used_today: 99,
        };
        assert_eq!(remaining_spins(&fresh, today), 1);
    }

    #[test]
    fn test_same_day_exhausted_cannot_spin() {
        let today = date(2026, 8, 7);
        let state = QuotaState {
            spins_per_day: 2,
            last_spin_date: Some(today),
            spins_used_today: 2,
        };
        assert_eq!(remaining_spins(&state, today), 0);
        assert!(!can_spin(&state, today));
    }

    #[test]
    fn test_record_spin_rollover_then_grant() {
        let today = date(2026, 8, 7);
        let state = QuotaState {
            spins_per_day: 1,
            last_spin_date: Some(date(2026, 8, 6)),
            spins_used_today: 1,
        };
        assert_eq!(remaining_spins(&state, today), 1);

        let (after, granted) = record_spin(&state, today);
        assert!(granted);
        assert_eq!(after.last_spin_date, Some(today));
        assert_eq!(after.spins_used_today, 1);
        assert_eq!(remaining_spins(&after, today), 0);

        let (after2, granted2) = record_spin(&after, today);
        assert!(!granted2);
        assert_eq!(after2, after);
    }

    #[test]
    fn test_rejection_is_idempotent() {
        let today = date(2026, 8, 7);
        let exhausted = QuotaState {
            spins_per_day: 1,
            last_spin_date: Some(today),
            spins_used_today: 1,
        };

        let mut state = exhausted;
        for _ in 0..10 {
            let (next, granted) = record_spin(&state, today);
            assert!(!granted);
            assert_eq!(next, exhausted);
            state = next;
        }
    }

    #[test]
    fn test_zero_or_negative_quota_never_eligible() {
        let today = date(2026, 8, 7);
        for per_day in [0, -1, -100] {
            let state = QuotaState {
                spins_per_day: per_day,
                last_spin_date: None,
                spins_used_today: 0,
            };
            assert_eq!(remaining_spins(&state, today), 0);
            assert!(!can_spin(&state, today));
            let (next, granted) = record_spin(&state, today);
            assert!(!granted);
            assert_eq!(next, state);
        }
    }

    #[test]
    fn test_second_spin_after_winner_is_rejected() {
        // 两个并发请求基于同一初始状态都会放行,
        // 以先落库者的结果为准重算后, 后到者必须被拒绝
        let today = date(2026, 8, 7);
        let base = QuotaState {
            spins_per_day: 1,
            last_spin_date: None,
            spins_used_today: 0,
        };

        let (winner_state, winner_granted) = record_spin(&base, today);
        assert!(winner_granted);

        let (loser_state, loser_granted) = record_spin(&winner_state, today);
        assert!(!loser_granted);
        assert_eq!(loser_state, winner_state);
    }
}
