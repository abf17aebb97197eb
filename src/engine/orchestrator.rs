// ==========================================
// 换电站电柜配置系统 - 分配编排器
// ==========================================
// 依据: Allocation_Engine_Specs_v1.0.md - 系统总览
// ==========================================
// 职责: 统一入口,组合加/减柜两个分配引擎
// 红线: 引擎是 (特征表, 配置) 的纯函数,
//       不依赖任何进程级会话缓存
// ==========================================

use crate::config::AllocationProfile;
use crate::domain::{AllocationPlan, RemovalPlan, StationRecord};
use crate::engine::add_allocator::AddAllocator;
use crate::engine::error::EngineError;
use crate::engine::remove_allocator::RemoveAllocator;

// ==========================================
// AllocationEngine - 分配编排器
// ==========================================
pub struct AllocationEngine {
    add_allocator: AddAllocator,
    remove_allocator: RemoveAllocator,
}

impl AllocationEngine {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            add_allocator: AddAllocator::new(),
            remove_allocator: RemoveAllocator::new(),
        }
    }

    /// 生成加柜建议方案
    ///
    /// # 参数
    /// - stations: 站点特征表（只读,引擎不修改）
    /// - profile: 策略配置
    pub fn suggest_allocation(
        &self,
        stations: &[StationRecord],
        profile: &AllocationProfile,
    ) -> Result<AllocationPlan, EngineError> {
        self.add_allocator.suggest(stations, profile)
    }

    /// 生成减柜建议方案
    ///
    /// # 参数
    /// - stations: 站点特征表（只读,引擎不修改）
    /// - profile: 策略配置
    pub fn suggest_removal(
        &self,
        stations: &[StationRecord],
        profile: &AllocationProfile,
    ) -> Result<RemovalPlan, EngineError> {
        self.remove_allocator.suggest(stations, profile)
    }

    /// 同一特征表上生成加/减柜两套方案
    ///
    /// 两个分配器是同一输入表的独立消费者,
    /// 各自在自己的可选集合内归一化评分,互不影响
    pub fn suggest_both(
        &self,
        stations: &[StationRecord],
        profile: &AllocationProfile,
    ) -> Result<(AllocationPlan, RemovalPlan), EngineError> {
        let allocation = self.suggest_allocation(stations, profile)?;
        let removal = self.suggest_removal(stations, profile)?;
        Ok((allocation, removal))
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for AllocationEngine {
    fn default() -> Self {
        Self::new()
    }
}
