// ==========================================
// 换电站电柜配置系统 - 核心库
// ==========================================
// 依据: Allocation_Engine_Specs_v1.0.md - 系统总览
// 系统定位: 决策支持系统 (人工最终控制权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 导入层 - 外部数据
pub mod importer;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    AllocationPlan, AllocationRow, RemovalPlan, RemovalRow, ScoredStation, StationRecord,
};

// 引擎
pub use engine::{
    AddAllocator, AllocationEngine, CompositeScorer, EngineError, FeatureNormalizer,
    ImpactEstimator, RemoveAllocator,
};

// 配置
pub use config::{AllocationProfile, ScoreWeights};

// 导入层
pub use importer::{ImportError, StationTableImporter};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "换电站电柜配置系统";

// ==========================================
// 预编译检查
// ==========================================

// 确保编译时所有模块可见
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
