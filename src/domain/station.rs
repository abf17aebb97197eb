// ==========================================
// 换电站电柜配置系统 - 站点领域模型
// ==========================================
// 依据: Allocation_Engine_Specs_v1.0.md - StationRecord/ScoredStation
// 依据: stations_processed 特征表字段口径
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// StationRecord - 站点特征记录
// ==========================================
// 用途: ETL 协作方产出的特征表行,引擎层只读
// 红线: 引擎不修改输入表,所有派生量写入新表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    // ===== 主键 =====
    pub station_id: String, // 站点唯一标识

    // ===== 电柜维度 =====
    pub unit_count: u32, // 当前在役电柜数（≥0）

    // ===== 换电吞吐维度 =====
    pub throughput_per_unit: f64,     // 单柜日均换电量
    pub throughput_per_day_mean: f64, // 站点日均换电量

    // ===== 需求转化维度 =====
    pub demand_conversion: f64,  // 观测需求转化率（swaps/observation 口径）
    pub unmet_demand_ratio: f64, // 未满足需求比（observation/swaps 口径）

    // ===== 地理维度 =====
    pub nearest_neighbor_distance_km: f64, // 最近邻站点距离（km）
}

// ==========================================
// ScoredStation - 已评分站点
// ==========================================
// 用途: Scorer 输出,每次调用重新派生,不持久化
// 归一化口径: 在当次操作的可选集合内做 min-max,不做全局归一化
#[derive(Debug, Clone, Serialize)]
pub struct ScoredStation {
    // 原始特征记录（只读引用语义,按值携带以保持输出自包含）
    pub record: StationRecord,

    // ===== 归一化特征（[0,1]）=====
    pub normalized_throughput_per_unit: f64,
    pub normalized_demand_conversion: f64,
    pub normalized_unmet_demand: f64,
    pub normalized_distance: f64,
    pub normalized_unit_count: f64, // 1/(1+unit_count),不做 min-max

    // ===== 综合优先分（[0,1]）=====
    pub composite_score: f64, // (Σ w_i * f_i) ^ exponent
}

impl ScoredStation {
    /// 站点主键的便捷访问
    pub fn station_id(&self) -> &str {
        &self.record.station_id
    }
}
