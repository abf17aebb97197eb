// ==========================================
// 换电站电柜配置系统 - 引擎层
// ==========================================
// 依据: Allocation_Engine_Specs_v1.0.md - 组件设计
// ==========================================
// 职责: 实现加/减柜分配规则引擎
// 红线: 引擎无状态、无 I/O,所有诊断必须输出 note
// 数据流: Normalizer → Scorer → {Add, Remove} Allocator → Impact
// ==========================================

pub mod add_allocator;
pub mod error;
pub mod impact;
pub mod normalizer;
pub mod orchestrator;
pub mod remove_allocator;
pub mod scoring;

// 重导出核心引擎
pub use add_allocator::AddAllocator;
pub use error::EngineError;
pub use impact::ImpactEstimator;
pub use normalizer::FeatureNormalizer;
pub use orchestrator::AllocationEngine;
pub use remove_allocator::RemoveAllocator;
pub use scoring::CompositeScorer;

/// 归一化与倒数评分共用的防除零小量
pub const EPSILON: f64 = 1e-9;
