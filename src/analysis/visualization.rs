//! 可视化数据
//!
//! 为前端绘制骨架和问题部位准备数据，本模块不做任何绘制。

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::aggregator::find_keypoint;
use super::geometry::midpoint;
use crate::models::{IssueHighlight, Keypoint, KeypointName, Point, PostureType, Segment};

/// 绘制关节点所需的最低置信度（严格大于）
pub const MIN_DRAW_CONFIDENCE: f32 = 0.3;

/// 骨架连线
pub const SKELETON_CONNECTIONS: [(KeypointName, KeypointName); 16] = [
    // 头部
    (KeypointName::Nose, KeypointName::LeftEye),
    (KeypointName::Nose, KeypointName::RightEye),
    (KeypointName::LeftEye, KeypointName::LeftEar),
    (KeypointName::RightEye, KeypointName::RightEar),
    // 躯干
    (KeypointName::LeftShoulder, KeypointName::RightShoulder),
    (KeypointName::LeftShoulder, KeypointName::LeftHip),
    (KeypointName::RightShoulder, KeypointName::RightHip),
    (KeypointName::LeftHip, KeypointName::RightHip),
    // 手臂
    (KeypointName::LeftShoulder, KeypointName::LeftElbow),
    (KeypointName::LeftElbow, KeypointName::LeftWrist),
    (KeypointName::RightShoulder, KeypointName::RightElbow),
    (KeypointName::RightElbow, KeypointName::RightWrist),
    // 腿
    (KeypointName::LeftHip, KeypointName::LeftKnee),
    (KeypointName::LeftKnee, KeypointName::LeftAnkle),
    (KeypointName::RightHip, KeypointName::RightKnee),
    (KeypointName::RightKnee, KeypointName::RightAnkle),
];

/// 分数档位（用于UI配色）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreGrade {
    Good,
    Warning,
    Poor,
}

impl ScoreGrade {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Good,
            60..=79 => Self::Warning,
            _ => Self::Poor,
        }
    }

    /// 获取档位颜色
    pub fn color(&self) -> &str {
        match self {
            Self::Good => "#16A34A",    // 绿色
            Self::Warning => "#F59E0B", // 黄色
            Self::Poor => "#EF4444",    // 红色
        }
    }
}

fn drawable(keypoints: &[Keypoint], name: KeypointName) -> Option<Point> {
    find_keypoint(keypoints, name)
        .filter(|kp| kp.confidence > MIN_DRAW_CONFIDENCE)
        .map(|kp| kp.point())
}

/// 两端关节都足够可信的骨架线段
pub fn skeleton_segments(keypoints: &[Keypoint]) -> Vec<Segment> {
    SKELETON_CONNECTIONS
        .iter()
        .filter_map(|(a, b)| {
            let from = drawable(keypoints, *a)?;
            let to = drawable(keypoints, *b)?;
            Some(Segment { from, to })
        })
        .collect()
}

fn center(keypoints: &[Keypoint], left: KeypointName, right: KeypointName) -> Option<Point> {
    let left = find_keypoint(keypoints, left)?;
    let right = find_keypoint(keypoints, right)?;
    Some(midpoint(left.point(), right.point()))
}

fn shoulder_center(keypoints: &[Keypoint]) -> Option<Point> {
    center(keypoints, KeypointName::LeftShoulder, KeypointName::RightShoulder)
}

fn hip_center(keypoints: &[Keypoint]) -> Option<Point> {
    center(keypoints, KeypointName::LeftHip, KeypointName::RightHip)
}

fn highlight_for(keypoints: &[Keypoint], issue: PostureType) -> Option<IssueHighlight> {
    let (segment, label) = match issue {
        PostureType::ForwardHead => {
            let nose = find_keypoint(keypoints, KeypointName::Nose)?;
            (
                Segment {
                    from: nose.point(),
                    to: shoulder_center(keypoints)?,
                },
                "前傾頭位",
            )
        }
        PostureType::RoundedShoulders => {
            let left = find_keypoint(keypoints, KeypointName::LeftShoulder)?;
            let right = find_keypoint(keypoints, KeypointName::RightShoulder)?;
            (
                Segment {
                    from: left.point(),
                    to: right.point(),
                },
                "巻き肩",
            )
        }
        PostureType::Swayback => (
            Segment {
                from: shoulder_center(keypoints)?,
                to: hip_center(keypoints)?,
            },
            "反り腰",
        ),
        PostureType::Good | PostureType::Mixed => return None,
    };

    Some(IssueHighlight {
        issue,
        segment,
        label: label.to_string(),
    })
}

/// 检出问题对应的高亮线段，所需关节缺失时跳过
pub fn issue_highlights(
    keypoints: &[Keypoint],
    issues: &BTreeSet<PostureType>,
) -> Vec<IssueHighlight> {
    issues
        .iter()
        .filter_map(|issue| highlight_for(keypoints, *issue))
        .collect()
}
