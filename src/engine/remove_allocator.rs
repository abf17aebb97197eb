// ==========================================
// 换电站电柜配置系统 - 减柜分配引擎
// ==========================================
// 依据: Allocation_Engine_Specs_v1.0.md - 4.4 Remove Allocator
// ==========================================
// 职责: 按倒数分配撤除预算（低效站点先撤柜）,
//       迭代再分配以尊重每站保留下限
// 输入: 站点特征表 + 策略配置
// 输出: RemovalPlan（缺口显式报告,按撤除数降序）
// 红线: 外层循环每轮必须严格减少剩余预算或候选集合,
//       另设防御性轮数上限兜底畸形输入
// ==========================================

use crate::config::AllocationProfile;
use crate::domain::{RemovalPlan, RemovalRow, ScoredStation, StationRecord};
use crate::engine::error::EngineError;
use crate::engine::impact::ImpactEstimator;
use crate::engine::scoring::CompositeScorer;
use crate::engine::EPSILON;
use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// RemoveAllocator - 减柜分配引擎
// ==========================================
pub struct RemoveAllocator {
    // 无状态引擎,不需要注入依赖
}

impl RemoveAllocator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 生成减柜建议方案
    ///
    /// 规则（依据 Allocation_Engine_Specs 4.4）:
    /// 1) 过滤 unit_count > min_units_threshold 的站点
    /// 2) inverse = 1/(score+ε), 低效站点初始份额更大
    /// 3) 比例取整后迭代补齐: 每轮只对仍有可撤余量的站点
    ///    按 inverse 降序逐站 +1, 触底站点退出后续轮次
    /// 4) 候选耗尽时提前终止, 剩余预算记为 shortfall
    /// 5) 终钳位 removal ≤ max(unit_count - floor, 0) 兜底
    ///
    /// # 参数
    /// - stations: 站点特征表（只读）
    /// - profile: 策略配置
    ///
    /// # 返回
    /// - `Ok(RemovalPlan)`: 完整方案（可能部分履约）
    /// - `Err(EngineError::InvalidConfiguration)`: 配置结构性非法
    #[instrument(skip(self, stations), fields(
        station_count = stations.len(),
        remove_budget = profile.remove_budget
    ))]
    pub fn suggest(
        &self,
        stations: &[StationRecord],
        profile: &AllocationProfile,
    ) -> Result<RemovalPlan, EngineError> {
        profile.validate()?;

        if profile.remove_budget == 0 {
            return Err(EngineError::InvalidConfiguration(
                "remove_budget 必须为正整数".to_string(),
            ));
        }

        let budget = profile.remove_budget;
        let floor = profile.min_units_remaining_floor;

        // 1. 可选集合过滤
        let eligible: Vec<StationRecord> = stations
            .iter()
            .filter(|s| s.unit_count > profile.min_units_threshold)
            .cloned()
            .collect();

        if eligible.is_empty() {
            info!("减柜可选集合为空, 返回空方案");
            return Ok(Self::empty_plan(
                budget,
                vec!["可选集合为空: 所有站点电柜数均不高于下限".to_string()],
            ));
        }

        // 2. 评分与倒数份额
        let (scored, mut notes) =
            CompositeScorer::score(&eligible, &profile.weights, profile.exponent);
        let inverse: Vec<f64> = scored
            .iter()
            .map(|s| 1.0 / (s.composite_score + EPSILON))
            .collect();
        let inverse_total: f64 = inverse.iter().sum();

        // 每站可撤上限（不低于保留下限）
        let capacity: Vec<u32> = scored
            .iter()
            .map(|s| s.record.unit_count.saturating_sub(floor))
            .collect();

        // 3. 比例取整, 并钳位到各站可撤上限
        let mut removal: Vec<u32> = inverse
            .iter()
            .zip(capacity.iter())
            .map(|(inv, cap)| {
                let share = inv / inverse_total * f64::from(budget);
                (share.floor() as u32).min(*cap)
            })
            .collect();

        // 4. 迭代补齐
        Self::redistribute(&mut removal, &inverse, &capacity, &scored, budget);

        // 5. 终钳位（兜底,正常路径下为恒等变换）
        for (r, cap) in removal.iter_mut().zip(capacity.iter()) {
            *r = (*r).min(*cap);
        }

        let fulfilled: u32 = removal.iter().sum();
        let shortfall = budget - fulfilled;
        if shortfall > 0 {
            let note = format!(
                "INFEASIBLE_BUDGET: 可撤除总量不足, 请求 {} 实际 {} 缺口 {}",
                budget, fulfilled, shortfall
            );
            warn!("{}", note);
            notes.push(note);
        }

        // 6. 建议行与影响估算
        let mut rows: Vec<RemovalRow> = scored
            .iter()
            .zip(removal.iter())
            .filter(|(_, units)| **units > 0)
            .map(|(station, units)| Self::build_row(station, *units))
            .collect();

        rows.sort_by(|a, b| {
            b.units_to_remove
                .cmp(&a.units_to_remove)
                .then_with(|| a.station_id.cmp(&b.station_id))
        });

        let total_loss: f64 = rows.iter().map(|r| r.projected_loss).sum();
        let mean_loss = if rows.is_empty() {
            0.0
        } else {
            total_loss / rows.len() as f64
        };

        info!(
            fulfilled,
            shortfall,
            row_count = rows.len(),
            total_loss,
            "减柜方案生成完成"
        );

        Ok(RemovalPlan {
            plan_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            requested_budget: budget,
            fulfilled,
            shortfall,
            rows,
            total_loss,
            mean_loss,
            notes,
        })
    }

    // ==========================================
    // 迭代再分配
    // ==========================================

    /// 约束下的迭代补齐循环
    ///
    /// 每轮: 取 max_removable > 0 的候选站点, 按 inverse 降序
    /// （低效优先,平局按 station_id 升序）逐站 +1, 直到预算
    /// 耗尽或候选耗尽。单轮可能把多站推到下限,故需多轮,
    /// 新触底站点自动退出后续轮次。
    ///
    /// 终止性: 每轮要么消耗预算要么清空候选; 防御上限
    /// budget + 站点数 轮兜底畸形输入。
    fn redistribute(
        removal: &mut [u32],
        inverse: &[f64],
        capacity: &[u32],
        scored: &[ScoredStation],
        budget: u32,
    ) {
        let pass_cap = budget as usize + scored.len();
        let mut passes = 0;

        while removal.iter().sum::<u32>() < budget {
            passes += 1;
            if passes > pass_cap {
                warn!("迭代补齐超过防御轮数上限 {}, 提前终止", pass_cap);
                break;
            }

            let mut remaining = budget - removal.iter().sum::<u32>();

            // 本轮仍有可撤余量的候选
            let mut candidates: Vec<usize> = (0..removal.len())
                .filter(|&i| capacity[i] > removal[i])
                .collect();
            if candidates.is_empty() {
                break; // 无处可撤, 剩余预算记缺口
            }

            // 低效优先, 平局按 station_id 升序
            candidates.sort_by(|&a, &b| {
                inverse[b]
                    .total_cmp(&inverse[a])
                    .then_with(|| scored[a].station_id().cmp(scored[b].station_id()))
            });

            for idx in candidates {
                if remaining == 0 {
                    break;
                }
                removal[idx] += 1;
                remaining -= 1;
            }
        }
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 构造单条建议行
    fn build_row(station: &ScoredStation, units_to_remove: u32) -> RemovalRow {
        let record = &station.record;
        let (projected, impact) = ImpactEstimator::project(
            record.throughput_per_day_mean,
            record.throughput_per_unit,
            record.unit_count,
            -i64::from(units_to_remove),
        );

        RemovalRow {
            station_id: record.station_id.clone(),
            units_to_remove,
            unit_count: record.unit_count,
            throughput_per_day_mean: record.throughput_per_day_mean,
            projected_throughput_per_day: projected,
            projected_loss: -impact, // 影响值为负, 损失取相反数（≥0）
            throughput_per_unit: record.throughput_per_unit,
            demand_conversion: record.demand_conversion,
            unmet_demand_ratio: record.unmet_demand_ratio,
            nearest_neighbor_distance_km: record.nearest_neighbor_distance_km,
        }
    }

    /// 构造空方案
    fn empty_plan(requested_budget: u32, notes: Vec<String>) -> RemovalPlan {
        RemovalPlan {
            plan_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            requested_budget,
            fulfilled: 0,
            shortfall: requested_budget,
            rows: Vec::new(),
            total_loss: 0.0,
            mean_loss: 0.0,
            notes,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for RemoveAllocator {
    fn default() -> Self {
        Self::new()
    }
}
