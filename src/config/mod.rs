// ==========================================
// 换电站电柜配置系统 - 配置层
// ==========================================
// 依据: Allocation_Engine_Specs_v1.0.md - 配置项全集
// ==========================================
// 职责: 分配/撤除策略参数管理与校验
// 红线: 无隐式默认值之外的隐藏参数,非法配置显式报错
// ==========================================

pub mod allocation_profile;

// 重导出核心配置对象
pub use allocation_profile::{AllocationProfile, ScoreWeights};
