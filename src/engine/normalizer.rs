// ==========================================
// 换电站电柜配置系统 - 特征归一化
// ==========================================
// 依据: Allocation_Engine_Specs_v1.0.md - 4.1 Feature Normalizer
// 职责: 提供 min-max 归一化与退化列检测的纯逻辑
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::engine::EPSILON;

// ==========================================
// FeatureNormalizer - 纯函数工具类
// ==========================================
pub struct FeatureNormalizer;

impl FeatureNormalizer {
    /// min-max 归一化
    ///
    /// # 规则
    /// - y_i = (x_i - min) / (max - min + ε)
    /// - 全列取值相同时输出全 0（分子为 0）,不报错
    /// - 结果落在 [0, 1]
    ///
    /// # 参数
    /// - values: 当次操作可选集合上的一列特征值
    pub fn min_max(values: &[f64]) -> Vec<f64> {
        if values.is_empty() {
            return Vec::new();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min + EPSILON;

        values.iter().map(|v| (v - min) / range).collect()
    }

    /// 判断一列是否退化（所有取值相同）
    ///
    /// 退化列的归一化结果为常数 0,后续平分规则完全依赖
    /// 确定性平局裁决,需向调用方发出低严重度诊断
    pub fn is_degenerate(values: &[f64]) -> bool {
        match values.split_first() {
            Some((first, rest)) if !rest.is_empty() => rest.iter().all(|v| v == first),
            _ => false,
        }
    }

    /// 电柜数量维度评分: 1 / (1 + unit_count)
    ///
    /// # 规则
    /// - 不做 min-max,少柜站点在该维度恒得高分
    /// - 单调递减,值域 (0, 1]
    pub fn inverse_unit_count(unit_count: u32) -> f64 {
        1.0 / (1.0 + f64::from(unit_count))
    }
}
