// ==========================================
// 换电站电柜配置系统 - 综合评分引擎
// ==========================================
// 依据: Allocation_Engine_Specs_v1.0.md - 4.2 Composite Scorer
// ==========================================
// 职责: 五维归一化特征的加权合成与指数放大
// 输入: 当次操作的可选站点集合
// 输出: ScoredStation 列表 + 退化诊断 note
// 红线: 归一化只在当次可选集合内进行,不做全局归一化
// ==========================================

use crate::config::ScoreWeights;
use crate::domain::{ScoredStation, StationRecord};
use crate::engine::normalizer::FeatureNormalizer;
use tracing::warn;

// ==========================================
// CompositeScorer - 综合评分引擎
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
pub struct CompositeScorer;

impl CompositeScorer {
    /// 对可选站点集合评分
    ///
    /// # 规则
    /// 1. 四个连续特征在集合内 min-max 归一化
    /// 2. 电柜数量维度取 1/(1+unit_count)
    /// 3. raw = Σ w_i * f_i; score = raw ^ exponent
    /// 4. exponent 放大高低分差异,推向强者多得的分布
    ///
    /// # 参数
    /// - records: 可选站点集合（调用方已做阈值过滤）
    /// - weights: 非负相对权重（调用方已校验）
    /// - exponent: 正指数（调用方已校验）
    ///
    /// # 返回
    /// (评分结果, 退化诊断列表)
    pub fn score(
        records: &[StationRecord],
        weights: &ScoreWeights,
        exponent: f64,
    ) -> (Vec<ScoredStation>, Vec<String>) {
        if records.is_empty() {
            return (Vec::new(), Vec::new());
        }

        let throughput: Vec<f64> = records.iter().map(|r| r.throughput_per_unit).collect();
        let conversion: Vec<f64> = records.iter().map(|r| r.demand_conversion).collect();
        let unmet: Vec<f64> = records.iter().map(|r| r.unmet_demand_ratio).collect();
        let distance: Vec<f64> = records
            .iter()
            .map(|r| r.nearest_neighbor_distance_km)
            .collect();

        let notes = Self::collect_degenerate_notes(&[
            ("throughput_per_unit", &throughput),
            ("demand_conversion", &conversion),
            ("unmet_demand_ratio", &unmet),
            ("nearest_neighbor_distance_km", &distance),
        ]);

        let norm_throughput = FeatureNormalizer::min_max(&throughput);
        let norm_conversion = FeatureNormalizer::min_max(&conversion);
        let norm_unmet = FeatureNormalizer::min_max(&unmet);
        let norm_distance = FeatureNormalizer::min_max(&distance);

        let scored = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let normalized_unit_count = FeatureNormalizer::inverse_unit_count(record.unit_count);
                let raw = weights.throughput_per_unit * norm_throughput[i]
                    + weights.demand_conversion * norm_conversion[i]
                    + weights.unmet_demand * norm_unmet[i]
                    + weights.distance * norm_distance[i]
                    + weights.unit_count * normalized_unit_count;

                ScoredStation {
                    record: record.clone(),
                    normalized_throughput_per_unit: norm_throughput[i],
                    normalized_demand_conversion: norm_conversion[i],
                    normalized_unmet_demand: norm_unmet[i],
                    normalized_distance: norm_distance[i],
                    normalized_unit_count,
                    composite_score: raw.powf(exponent),
                }
            })
            .collect();

        (scored, notes)
    }

    /// 汇总退化列诊断
    ///
    /// 退化列不是错误,但使该维度失去区分度,平局裁决
    /// 完全依赖确定性次序,需要向调用方提示
    fn collect_degenerate_notes(columns: &[(&str, &Vec<f64>)]) -> Vec<String> {
        let mut notes = Vec::new();
        for (name, values) in columns {
            if FeatureNormalizer::is_degenerate(values) {
                let note = format!(
                    "DEGENERATE: {} 在可选集合内所有取值相同, 归一化结果全为 0",
                    name
                );
                warn!("{}", note);
                notes.push(note);
            }
        }
        notes
    }
}
