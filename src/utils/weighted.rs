use rand::Rng;

use crate::entities::prize_entity as prizes;

/// 奖品权重总和 (负权重按 0 计)。
pub fn total_weight(list: &[prizes::Model]) -> i64 {
    list.iter().map(|p| p.weight.max(0) as i64).sum()
}

/// 按累计权重在调用方给定顺序上定位 r 对应的奖品。
/// 命中第一个累计权重 > r 的奖品 (区间按 [0, total) 左闭右开约定);
/// 浮点累加误差越界时回退到最后一个正权重奖品, 零权重奖品永远不会被选中。
pub fn pick_by_cumulative(list: &[prizes::Model], r: f64) -> Option<&prizes::Model> {
    let mut upto = 0.0;
    let mut fallback = None;

    for p in list {
        let w = p.weight.max(0);
        if w == 0 {
            continue;
        }
        upto += w as f64;
        if r < upto {
            return Some(p);
        }
        fallback = Some(p);
    }

    fallback
}

/// 加权随机抽取: 总权重 <= 0 时返回 None (调用方视为无可抽奖品, 硬性失败)。
/// 随机源由调用方注入, 业务路径传 thread_rng, 测试传固定种子的 StdRng。
pub fn choose_prize<'a, R: Rng + ?Sized>(
    list: &'a [prizes::Model],
    rng: &mut R,
) -> Option<&'a prizes::Model> {
    let total = total_weight(list);
    if total <= 0 {
        return None;
    }

    let r = rng.gen_range(0.0..total as f64);
    pick_by_cumulative(list, r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn prize(id: i64, weight: i32) -> prizes::Model {
        prizes::Model {
            id,
            name: format!("Prize #{id}"),
            weight,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_zero_boundary_picks_first_prize() {
        let list = vec![prize(1, 10), prize(2, 0), prize(3, 5)];
        let picked = pick_by_cumulative(&list, 0.0).unwrap();
        assert_eq!(picked.id, 1);
    }

    #[test]
    fn test_supremum_falls_back_to_last_weighted_prize() {
        // r == 总权重 (上确界) 走回退分支, 必须命中最后一个正权重奖品而不是零权重奖品
        let list = vec![prize(1, 10), prize(2, 0), prize(3, 5)];
        let picked = pick_by_cumulative(&list, 15.0).unwrap();
        assert_eq!(picked.id, 3);

        // 零权重排在末尾时同样不可命中
        let list = vec![prize(1, 10), prize(2, 5), prize(3, 0)];
        let picked = pick_by_cumulative(&list, 15.0).unwrap();
        assert_eq!(picked.id, 2);
    }

    #[test]
    fn test_all_zero_weights_returns_none() {
        let list = vec![prize(1, 0), prize(2, 0)];
        assert!(pick_by_cumulative(&list, 0.0).is_none());

        let mut rng = StdRng::seed_from_u64(7);
        assert!(choose_prize(&list, &mut rng).is_none());
        assert!(choose_prize(&[], &mut rng).is_none());
    }

    #[test]
    fn test_negative_weight_clamped_to_zero() {
        let list = vec![prize(1, -5), prize(2, 3)];
        assert_eq!(total_weight(&list), 3);

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let picked = choose_prize(&list, &mut rng).unwrap();
            assert_eq!(picked.id, 2);
        }

        let all_negative = vec![prize(1, -1), prize(2, -10)];
        assert!(choose_prize(&all_negative, &mut rng).is_none());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let list = vec![prize(1, 10), prize(2, 0), prize(3, 5)];

        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let pa = choose_prize(&list, &mut a).unwrap().id;
            let pb = choose_prize(&list, &mut b).unwrap().id;
            assert_eq!(pa, pb);
        }
    }

    #[test]
    fn test_empirical_frequency_matches_weights() {
        let list = vec![prize(1, 10), prize(2, 0), prize(3, 5)];
        let mut rng = StdRng::seed_from_u64(20260807);

        let trials = 100_000;
        let mut counts: HashMap<i64, u32> = HashMap::new();
        for _ in 0..trials {
            let picked = choose_prize(&list, &mut rng).unwrap();
            *counts.entry(picked.id).or_insert(0) += 1;
        }

        assert_eq!(counts.get(&2), None);

        let freq1 = f64::from(counts[&1]) / trials as f64;
        let freq3 = f64::from(counts[&3]) / trials as f64;
        // 期望 10/15 与 5/15, 采样容差 1%
        assert!((freq1 - 10.0 / 15.0).abs() < 0.01, "freq1 = {freq1}");
        assert!((freq3 - 5.0 / 15.0).abs() < 0.01, "freq3 = {freq3}");
    }
}
