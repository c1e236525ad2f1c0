//! 姿势分析模块
//!
//! 负责核心的姿势诊断逻辑，包括：
//! - 几何计算与关节点聚合
//! - 姿势信号映射
//! - 分类评分引擎（主路径/问卷回退路径）
//! - 姿势类型知识库与结果组装

pub mod aggregator;
pub mod assembler;
pub mod engine;
pub mod geometry;
pub mod knowledge;
pub mod signals;
pub mod visualization;

// 重新导出常用结构体和函数
pub use aggregator::{aggregate, AggregatedPose};
pub use assembler::{assemble_detected, assemble_fallback, QUESTIONNAIRE_MARKER};
pub use engine::{
    classify_from_questionnaire, classify_with_signals, Classification, PostureThresholds,
};
pub use knowledge::PostureProfile;
pub use signals::compute_signals;
pub use visualization::ScoreGrade;
