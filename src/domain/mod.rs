// ==========================================
// 换电站电柜配置系统 - 领域模型层
// ==========================================
// 依据: Allocation_Engine_Specs_v1.0.md - 数据模型
// ==========================================
// 职责: 定义领域实体与输出表结构
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod plan;
pub mod station;

// 重导出核心类型
pub use plan::{AllocationPlan, AllocationRow, RemovalPlan, RemovalRow};
pub use station::{ScoredStation, StationRecord};
