// ==========================================
// 换电站电柜配置系统 - 加柜分配引擎
// ==========================================
// 依据: Allocation_Engine_Specs_v1.0.md - 4.3 Add Allocator
// ==========================================
// 职责: 按综合分比例分配新增电柜预算（最大余额法）
// 输入: 站点特征表 + 策略配置
// 输出: AllocationPlan（预算守恒,按建议数降序）
// 红线: 可选集合为空返回空方案而非错误;
//       平局裁决必须确定性（余数降序 → station_id 升序）
// ==========================================

use crate::config::AllocationProfile;
use crate::domain::{AllocationPlan, AllocationRow, ScoredStation, StationRecord};
use crate::engine::error::EngineError;
use crate::engine::impact::ImpactEstimator;
use crate::engine::scoring::CompositeScorer;
use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

// ==========================================
// AddAllocator - 加柜分配引擎
// ==========================================
pub struct AddAllocator {
    // 无状态引擎,不需要注入依赖
}

impl AddAllocator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 生成加柜建议方案
    ///
    /// 规则（依据 Allocation_Engine_Specs 4.3）:
    /// 1) 过滤 unit_count < max_units_threshold 的站点
    /// 2) 在可选集合内归一化并评分
    /// 3) 最大余额法整数分摊,预算严格守恒
    /// 4) 边际递减口径估算增益,过滤零建议行并降序输出
    ///
    /// # 参数
    /// - stations: 站点特征表（只读）
    /// - profile: 策略配置
    ///
    /// # 返回
    /// - `Ok(AllocationPlan)`: 完整方案（可能为空）
    /// - `Err(EngineError::InvalidConfiguration)`: 配置结构性非法
    #[instrument(skip(self, stations), fields(
        station_count = stations.len(),
        add_budget = profile.add_budget
    ))]
    pub fn suggest(
        &self,
        stations: &[StationRecord],
        profile: &AllocationProfile,
    ) -> Result<AllocationPlan, EngineError> {
        profile.validate()?;

        if profile.add_budget == 0 {
            return Err(EngineError::InvalidConfiguration(
                "add_budget 必须为正整数".to_string(),
            ));
        }

        // 1. 可选集合过滤
        let eligible: Vec<StationRecord> = stations
            .iter()
            .filter(|s| s.unit_count < profile.max_units_threshold)
            .cloned()
            .collect();

        if eligible.is_empty() {
            info!("加柜可选集合为空, 返回空方案");
            return Ok(Self::empty_plan(
                profile.add_budget,
                vec!["可选集合为空: 所有站点电柜数均达到上限".to_string()],
            ));
        }

        // 2. 评分
        let (scored, mut notes) =
            CompositeScorer::score(&eligible, &profile.weights, profile.exponent);

        // 3. 整数分摊
        let score_pairs: Vec<(&str, f64)> = scored
            .iter()
            .map(|s| (s.station_id(), s.composite_score))
            .collect();
        let allocation = Self::apportion(&score_pairs, profile.add_budget);

        if allocation.iter().all(|a| *a == 0) {
            let note = "所有站点综合分为 0, 无法按比例分摊".to_string();
            info!("{}", note);
            notes.push(note);
            return Ok(Self::empty_plan(profile.add_budget, notes));
        }

        // 4. 建议行与影响估算
        let mut rows: Vec<AllocationRow> = scored
            .iter()
            .zip(allocation.iter())
            .filter(|(_, units)| **units > 0)
            .map(|(station, units)| Self::build_row(station, *units))
            .collect();

        // 建议数降序, 同数按 station_id 升序保证确定性
        rows.sort_by(|a, b| {
            b.units_to_add
                .cmp(&a.units_to_add)
                .then_with(|| a.station_id.cmp(&b.station_id))
        });

        let total_gain: f64 = rows.iter().map(|r| r.projected_gain).sum();
        let mean_gain = if rows.is_empty() {
            0.0
        } else {
            total_gain / rows.len() as f64
        };

        info!(
            allocated = rows.iter().map(|r| r.units_to_add).sum::<u32>(),
            row_count = rows.len(),
            total_gain,
            "加柜方案生成完成"
        );

        Ok(AllocationPlan {
            plan_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            requested_budget: profile.add_budget,
            rows,
            total_gain,
            mean_gain,
            notes,
        })
    }

    // ==========================================
    // 最大余额法分摊
    // ==========================================

    /// 最大余额法（Hamilton 分摊）
    ///
    /// # 规则
    /// 1. exact_i = (score_i / Σ score) * budget
    /// 2. floor_i = ⌊exact_i⌋, remainder = budget - Σ floor_i
    /// 3. 按小数余额降序取前 remainder 个站点各 +1,
    ///    余额相同按 station_id 升序裁决
    /// 4. Σ score ≤ 0 时返回全 0（无法定义比例份额）
    ///
    /// # 参数
    /// - stations: (station_id, 综合分) 对,顺序与返回值对齐
    /// - budget: 待分摊整数预算
    ///
    /// # 返回
    /// 与输入顺序对齐的整数分摊结果, Σ score > 0 时总和严格等于 budget
    pub fn apportion(stations: &[(&str, f64)], budget: u32) -> Vec<u32> {
        let total: f64 = stations.iter().map(|(_, score)| score).sum();
        if stations.is_empty() || total <= 0.0 {
            return vec![0; stations.len()];
        }

        let exact: Vec<f64> = stations
            .iter()
            .map(|(_, score)| score / total * f64::from(budget))
            .collect();
        let mut allocation: Vec<u32> = exact.iter().map(|e| e.floor() as u32).collect();

        let assigned: u32 = allocation.iter().sum();
        let remainder = budget.saturating_sub(assigned);

        if remainder > 0 {
            // 小数余额降序, 平局按 station_id 升序
            let mut order: Vec<usize> = (0..stations.len()).collect();
            order.sort_by(|&a, &b| {
                let frac_a = exact[a] - exact[a].floor();
                let frac_b = exact[b] - exact[b].floor();
                frac_b
                    .total_cmp(&frac_a)
                    .then_with(|| stations[a].0.cmp(stations[b].0))
            });

            for &idx in order.iter().take(remainder as usize) {
                allocation[idx] += 1;
            }
        }

        allocation
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 构造单条建议行
    fn build_row(station: &ScoredStation, units_to_add: u32) -> AllocationRow {
        let record = &station.record;
        let (projected, gain) = ImpactEstimator::project(
            record.throughput_per_day_mean,
            record.throughput_per_unit,
            record.unit_count,
            i64::from(units_to_add),
        );

        AllocationRow {
            station_id: record.station_id.clone(),
            units_to_add,
            unit_count: record.unit_count,
            throughput_per_day_mean: record.throughput_per_day_mean,
            projected_throughput_per_day: projected,
            projected_gain: gain,
            throughput_per_unit: record.throughput_per_unit,
            demand_conversion: record.demand_conversion,
            unmet_demand_ratio: record.unmet_demand_ratio,
            nearest_neighbor_distance_km: record.nearest_neighbor_distance_km,
        }
    }

    /// 构造空方案
    fn empty_plan(requested_budget: u32, notes: Vec<String>) -> AllocationPlan {
        AllocationPlan {
            plan_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            requested_budget,
            rows: Vec::new(),
            total_gain: 0.0,
            mean_gain: 0.0,
            notes,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for AddAllocator {
    fn default() -> Self {
        Self::new()
    }
}
