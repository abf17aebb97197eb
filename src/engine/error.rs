// ==========================================
// 换电站电柜配置系统 - 引擎层错误类型
// ==========================================
// 依据: Rust 错误处理最佳实践
// 工具: thiserror 派生宏
// ==========================================
// 红线: 预算不可满足不是错误,由 RemovalPlan.shortfall 显式报告;
//       退化输入不是错误,由方案 notes 记录
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
///
/// 仅结构性非法配置会进入错误路径,引擎的所有数据路径
/// 都返回完整（可能为空或部分履约）的方案表。
#[derive(Error, Debug)]
pub enum EngineError {
    // ===== 配置错误 =====
    #[error("配置无效: {0}")]
    InvalidConfiguration(String),

    #[error("字段值错误 (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
