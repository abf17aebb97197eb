// ==========================================
// 换电站电柜配置系统 - 策略配置
// ==========================================
// 依据: Allocation_Engine_Specs_v1.0.md - 6. 配置面
// ==========================================
// 职责: 承载预算、阈值、权重、指数等策略参数
// 校验: validate() 拒绝结构性非法配置,不做静默纠偏
// ==========================================

use crate::engine::error::EngineError;
use serde::{Deserialize, Serialize};

// ==========================================
// ScoreWeights - 综合评分权重
// ==========================================
// 权重为相对权重,不要求归一化到 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// 单柜换电量权重（越大越强调单柜效率）
    #[serde(default = "default_w_throughput_per_unit")]
    pub throughput_per_unit: f64,

    /// 需求转化率权重（swaps/observation）
    #[serde(default = "default_w_demand_conversion")]
    pub demand_conversion: f64,

    /// 未满足需求权重（observation/swaps）
    #[serde(default = "default_w_unmet_demand")]
    pub unmet_demand: f64,

    /// 最近邻距离权重（越大越强调覆盖空洞）
    #[serde(default = "default_w_distance")]
    pub distance: f64,

    /// 电柜数量权重（少柜站点在该维度恒得高分）
    #[serde(default = "default_w_unit_count")]
    pub unit_count: f64,
}

fn default_w_throughput_per_unit() -> f64 {
    0.35
}
fn default_w_demand_conversion() -> f64 {
    0.15
}
fn default_w_unmet_demand() -> f64 {
    0.3
}
fn default_w_distance() -> f64 {
    0.1
}
fn default_w_unit_count() -> f64 {
    0.1
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            throughput_per_unit: default_w_throughput_per_unit(),
            demand_conversion: default_w_demand_conversion(),
            unmet_demand: default_w_unmet_demand(),
            distance: default_w_distance(),
            unit_count: default_w_unit_count(),
        }
    }
}

impl ScoreWeights {
    /// 权重合计（用于全零校验）
    pub fn total(&self) -> f64 {
        self.throughput_per_unit
            + self.demand_conversion
            + self.unmet_demand
            + self.distance
            + self.unit_count
    }

    /// 以 (字段名, 值) 形式枚举权重,便于逐项校验
    fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("throughput_per_unit", self.throughput_per_unit),
            ("demand_conversion", self.demand_conversion),
            ("unmet_demand", self.unmet_demand),
            ("distance", self.distance),
            ("unit_count", self.unit_count),
        ]
    }
}

// ==========================================
// AllocationProfile - 分配/撤除策略配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationProfile {
    /// 请求新增电柜总数
    #[serde(default = "default_add_budget")]
    pub add_budget: u32,

    /// 请求撤除电柜总数
    #[serde(default = "default_remove_budget")]
    pub remove_budget: u32,

    /// 加柜可选上限: unit_count < max_units_threshold 才参与加柜
    #[serde(default = "default_max_units_threshold")]
    pub max_units_threshold: u32,

    /// 减柜可选下限: unit_count > min_units_threshold 才参与减柜
    #[serde(default = "default_min_units_threshold")]
    pub min_units_threshold: u32,

    /// 撤除硬下限: 撤除后每站至少保留的电柜数
    #[serde(default = "default_min_units_remaining_floor")]
    pub min_units_remaining_floor: u32,

    /// 评分指数（放大高低分差异,1 退化为纯比例分配）
    #[serde(default = "default_exponent")]
    pub exponent: f64,

    /// 综合评分权重
    #[serde(default)]
    pub weights: ScoreWeights,
}

fn default_add_budget() -> u32 {
    10
}
fn default_remove_budget() -> u32 {
    3
}
fn default_max_units_threshold() -> u32 {
    8
}
fn default_min_units_threshold() -> u32 {
    1
}
fn default_min_units_remaining_floor() -> u32 {
    0
}
fn default_exponent() -> f64 {
    5.0
}

impl Default for AllocationProfile {
    fn default() -> Self {
        Self {
            add_budget: default_add_budget(),
            remove_budget: default_remove_budget(),
            max_units_threshold: default_max_units_threshold(),
            min_units_threshold: default_min_units_threshold(),
            min_units_remaining_floor: default_min_units_remaining_floor(),
            exponent: default_exponent(),
            weights: ScoreWeights::default(),
        }
    }
}

impl AllocationProfile {
    /// 校验配置结构合法性
    ///
    /// # 规则
    /// 1. exponent 必须为正且有限
    /// 2. 各权重必须非负且有限
    /// 3. 权重合计必须 > 0（全零权重使评分退化为常数 0）
    /// 4. max_units_threshold 必须 ≥ 1（为 0 时加柜可选集合结构性为空）
    ///
    /// # 返回
    /// - `Ok(())`: 配置合法
    /// - `Err(EngineError::InvalidConfiguration)`: 首个违反的规则
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.exponent.is_finite() && self.exponent > 0.0) {
            return Err(EngineError::InvalidConfiguration(format!(
                "exponent 必须为正且有限, 实际为 {}",
                self.exponent
            )));
        }

        for (name, value) in self.weights.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::FieldValueError {
                    field: format!("weights.{}", name),
                    message: format!("权重必须非负且有限, 实际为 {}", value),
                });
            }
        }

        if self.weights.total() <= 0.0 {
            return Err(EngineError::InvalidConfiguration(
                "权重合计必须 > 0, 全零权重使评分退化为常数".to_string(),
            ));
        }

        if self.max_units_threshold == 0 {
            return Err(EngineError::InvalidConfiguration(
                "max_units_threshold 为 0 时加柜可选集合结构性为空".to_string(),
            ));
        }

        Ok(())
    }
}
