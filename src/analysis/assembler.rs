//! 结果组装
//!
//! 把分类结果和知识库条目合成最终的诊断结果。描述文本末尾会注明本次结果
//! 来自 AI 检测还是仅基于问卷。

use chrono::Utc;
use uuid::Uuid;

use super::engine::Classification;
use super::visualization::{issue_highlights, skeleton_segments};
use crate::models::{
    AnalysisBasis, DiagnosisResult, FallbackReason, Keypoint, PostureSignals, Visualization,
};

/// 问卷路径的描述后缀
pub const QUESTIONNAIRE_MARKER: &str = "（アンケート結果ベース）";

fn confidence_marker(confidence: f32) -> String {
    format!("（AI検出精度: {}%）", (confidence * 100.0).round() as i32)
}

fn build(
    classification: Classification,
    basis: AnalysisBasis,
    suffix: &str,
    visualization: Option<Visualization>,
) -> DiagnosisResult {
    let profile = classification.posture_type.profile();

    DiagnosisResult {
        id: Uuid::new_v4(),
        analyzed_at: Utc::now(),
        posture_type: classification.posture_type,
        score: classification.score,
        name: profile.display_name.to_string(),
        description: format!("{}{}", profile.description, suffix),
        problems: profile.problems.iter().map(|s| s.to_string()).collect(),
        recommendations: profile.recommendations.iter().map(|s| s.to_string()).collect(),
        basis,
        visualization,
    }
}

/// 组装主路径结果（附带可视化数据）
pub fn assemble_detected(
    classification: Classification,
    keypoints: Vec<Keypoint>,
    signals: PostureSignals,
) -> DiagnosisResult {
    let visualization = Visualization {
        skeleton: skeleton_segments(&keypoints),
        highlights: issue_highlights(&keypoints, &classification.detected_issues),
        detected_issues: classification.detected_issues.clone(),
        keypoints,
        signals,
    };

    build(
        classification,
        AnalysisBasis::PoseDetection {
            confidence: signals.confidence,
        },
        &confidence_marker(signals.confidence),
        Some(visualization),
    )
}

/// 组装回退路径结果
pub fn assemble_fallback(classification: Classification, reason: FallbackReason) -> DiagnosisResult {
    build(
        classification,
        AnalysisBasis::Questionnaire { reason },
        QUESTIONNAIRE_MARKER,
        None,
    )
}
