// ==========================================
// 换电站电柜配置系统 - 配置方案领域模型
// ==========================================
// 依据: Allocation_Engine_Specs_v1.0.md - AllocationPlan/RemovalPlan
// ==========================================
// 用途: 引擎输出,供看板协作方渲染
// 红线: 方案为一次调用的纯派生结果,不持久化、不回写
// ==========================================

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

// ==========================================
// AllocationRow - 加柜建议行
// ==========================================
// 对齐: 看板加柜建议表列顺序
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationRow {
    pub station_id: String,               // 站点标识
    pub units_to_add: u32,                // 建议新增电柜数（>0 才输出）
    pub unit_count: u32,                  // 当前电柜数
    pub throughput_per_day_mean: f64,     // 当前日均换电量
    pub projected_throughput_per_day: f64, // 预计日均换电量
    pub projected_gain: f64,              // 预计日均增益（≥0）

    // ===== 输入特征回显（看板展示用）=====
    pub throughput_per_unit: f64,
    pub demand_conversion: f64,
    pub unmet_demand_ratio: f64,
    pub nearest_neighbor_distance_km: f64,
}

// ==========================================
// AllocationPlan - 加柜建议方案
// ==========================================
// 不变式: 可选集合非空且总分>0时, Σ units_to_add == requested_budget
#[derive(Debug, Clone, Serialize)]
pub struct AllocationPlan {
    // ===== 方案标识与审计 =====
    pub plan_id: Uuid,                 // 方案唯一标识
    pub generated_at: DateTime<Utc>,   // 生成时间

    // ===== 请求参数回显 =====
    pub requested_budget: u32, // 请求新增电柜总数

    // ===== 建议明细（按 units_to_add 降序）=====
    pub rows: Vec<AllocationRow>,

    // ===== 汇总指标 =====
    pub total_gain: f64, // 预计总增益（日均换电量）
    pub mean_gain: f64,  // 站均增益（无行时为 0）

    // ===== 诊断信息 =====
    // 退化输入等低严重度提示,不构成错误
    pub notes: Vec<String>,
}

impl AllocationPlan {
    /// 实际分配的电柜总数
    pub fn allocated_units(&self) -> u32 {
        self.rows.iter().map(|r| r.units_to_add).sum()
    }

    /// 方案是否为空（无可建议站点）
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// RemovalRow - 减柜建议行
// ==========================================
// 对齐: 看板减柜建议表列顺序
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemovalRow {
    pub station_id: String,                // 站点标识
    pub units_to_remove: u32,              // 建议撤除电柜数（>0 才输出）
    pub unit_count: u32,                   // 当前电柜数
    pub throughput_per_day_mean: f64,      // 当前日均换电量
    pub projected_throughput_per_day: f64, // 预计日均换电量
    pub projected_loss: f64,               // 预计日均损失（≥0）

    // ===== 输入特征回显（看板展示用）=====
    pub throughput_per_unit: f64,
    pub demand_conversion: f64,
    pub unmet_demand_ratio: f64,
    pub nearest_neighbor_distance_km: f64,
}

// ==========================================
// RemovalPlan - 减柜建议方案
// ==========================================
// 不变式: Σ units_to_remove == min(requested_budget, 可撤除总量)
// 红线: 预算不可满足时必须显式报告 shortfall,不得静默视为成功
#[derive(Debug, Clone, Serialize)]
pub struct RemovalPlan {
    // ===== 方案标识与审计 =====
    pub plan_id: Uuid,
    pub generated_at: DateTime<Utc>,

    // ===== 请求参数回显与履约情况 =====
    pub requested_budget: u32, // 请求撤除电柜总数
    pub fulfilled: u32,        // 实际可撤除总数
    pub shortfall: u32,        // 缺口 = requested_budget - fulfilled

    // ===== 建议明细（按 units_to_remove 降序）=====
    pub rows: Vec<RemovalRow>,

    // ===== 汇总指标 =====
    pub total_loss: f64, // 预计总损失（日均换电量）
    pub mean_loss: f64,  // 站均损失（无行时为 0）

    // ===== 诊断信息 =====
    pub notes: Vec<String>,
}

impl RemovalPlan {
    /// 实际撤除的电柜总数
    pub fn removed_units(&self) -> u32 {
        self.rows.iter().map(|r| r.units_to_remove).sum()
    }

    /// 预算是否完整履约
    pub fn is_fully_fulfilled(&self) -> bool {
        self.shortfall == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_removal_plan(shortfall: u32) -> RemovalPlan {
        RemovalPlan {
            plan_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            requested_budget: 5,
            fulfilled: 5 - shortfall,
            shortfall,
            rows: Vec::new(),
            total_loss: 0.0,
            mean_loss: 0.0,
            notes: Vec::new(),
        }
    }

    #[test]
    fn test_removal_plan_fulfillment() {
        assert!(sample_removal_plan(0).is_fully_fulfilled());
        assert!(!sample_removal_plan(2).is_fully_fulfilled());
    }

    #[test]
    fn test_empty_allocation_plan() {
        let plan = AllocationPlan {
            plan_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            requested_budget: 10,
            rows: Vec::new(),
            total_gain: 0.0,
            mean_gain: 0.0,
            notes: Vec::new(),
        };
        assert!(plan.is_empty());
        assert_eq!(plan.allocated_units(), 0);
    }
}
