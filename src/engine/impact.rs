// ==========================================
// 换电站电柜配置系统 - 影响估算引擎
// ==========================================
// 依据: Allocation_Engine_Specs_v1.0.md - 4.5 Impact Estimator
// ==========================================
// 职责: 边际递减口径下的换电量投影
// 红线: 全定义函数,任何合法输入都不得产生除零/NaN;
//       影响值与电柜增减方向同号
// ==========================================

// ==========================================
// ImpactEstimator - 影响估算引擎
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
pub struct ImpactEstimator;

impl ImpactEstimator {
    /// 投影增减电柜后的日均换电量
    ///
    /// # 规则
    /// - delta > 0: new = old + tpu * ln(1+delta) / ln(2+unit_count)
    /// - delta < 0: new = old - tpu * ln(1+|delta|) / ln(1+unit_count)
    /// - delta = 0: new = old
    /// - 撤除口径下 unit_count=0 会使分母 ln(1)=0,按无变化处理
    ///   （可选集合过滤本应排除此类行,此处仅作兜底）
    ///
    /// # 参数
    /// - throughput_per_day: 当前日均换电量
    /// - throughput_per_unit: 单柜日均换电量
    /// - unit_count: 当前电柜数
    /// - delta: 电柜增减量（带符号）
    ///
    /// # 返回
    /// (投影日均换电量, 带符号影响值): 加柜影响 ≥ 0, 减柜影响 ≤ 0
    pub fn project(
        throughput_per_day: f64,
        throughput_per_unit: f64,
        unit_count: u32,
        delta: i64,
    ) -> (f64, f64) {
        if delta == 0 {
            return (throughput_per_day, 0.0);
        }

        if delta > 0 {
            // 加柜: 分母 ln(2+unit_count) 恒 > 0
            let denominator = (1.0 + f64::from(unit_count)).ln_1p();
            let gain = throughput_per_unit * (delta as f64).ln_1p() / denominator;
            return (throughput_per_day + gain, gain);
        }

        // 减柜: unit_count=0 时分母为 0,兜底为无变化
        if unit_count == 0 {
            return (throughput_per_day, 0.0);
        }
        let denominator = f64::from(unit_count).ln_1p();
        let loss = throughput_per_unit * (delta.unsigned_abs() as f64).ln_1p() / denominator;
        (throughput_per_day - loss, -loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================
    // 测试 1: 加柜投影
    // ==========================================

    #[test]
    fn test_project_addition_gain_is_non_negative() {
        let (new, impact) = ImpactEstimator::project(100.0, 20.0, 3, 2);
        assert!(impact >= 0.0);
        assert!((new - 100.0 - impact).abs() < 1e-12);
        // ln(3)/ln(5) * 20
        let expected = 20.0 * 3.0_f64.ln() / 5.0_f64.ln();
        assert!((impact - expected).abs() < 1e-9);
    }

    #[test]
    fn test_project_addition_diminishing_returns() {
        // 同样加 2 柜,存量越多增益越小
        let (_, gain_small) = ImpactEstimator::project(100.0, 20.0, 1, 2);
        let (_, gain_large) = ImpactEstimator::project(100.0, 20.0, 7, 2);
        assert!(gain_small > gain_large);
    }

    // ==========================================
    // 测试 2: 减柜投影
    // ==========================================

    #[test]
    fn test_project_removal_loss_is_non_positive() {
        let (new, impact) = ImpactEstimator::project(100.0, 20.0, 4, -2);
        assert!(impact <= 0.0);
        assert!(new < 100.0);
        let expected = 20.0 * 3.0_f64.ln() / 5.0_f64.ln();
        assert!((impact + expected).abs() < 1e-9);
    }

    #[test]
    fn test_project_removal_zero_unit_count_no_fault() {
        // unit_count=0 不得触发除零,按无变化兜底
        let (new, impact) = ImpactEstimator::project(50.0, 20.0, 0, -3);
        assert_eq!(new, 50.0);
        assert_eq!(impact, 0.0);
        assert!(new.is_finite());
    }

    // ==========================================
    // 测试 3: 全定义与单调性
    // ==========================================

    #[test]
    fn test_project_zero_delta_is_identity() {
        let (new, impact) = ImpactEstimator::project(77.5, 12.0, 5, 0);
        assert_eq!(new, 77.5);
        assert_eq!(impact, 0.0);
    }

    #[test]
    fn test_project_sign_monotonicity() {
        use std::cmp::Ordering;

        for delta in [-5_i64, -1, 0, 1, 5] {
            let (_, impact) = ImpactEstimator::project(100.0, 15.0, 6, delta);
            match delta.cmp(&0) {
                Ordering::Less => assert!(impact < 0.0, "delta={} 应为损失", delta),
                Ordering::Equal => assert_eq!(impact, 0.0),
                Ordering::Greater => assert!(impact > 0.0, "delta={} 应为增益", delta),
            }
        }
    }
}
