//! 关节点聚合
//!
//! 从单个人体的关节点中按名称取出主要关节，计算肩/髋中点和综合置信度。
//! 缺失的关节不会报错，只会拉低综合置信度。

use super::geometry::midpoint;
use crate::models::{Keypoint, KeypointName, Point};

/// 参与综合置信度计算的参考关节
pub const REFERENCE_JOINTS: [KeypointName; 5] = [
    KeypointName::Nose,
    KeypointName::LeftShoulder,
    KeypointName::RightShoulder,
    KeypointName::LeftHip,
    KeypointName::RightHip,
];

/// 聚合后的关节点
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedPose {
    pub nose: Option<Keypoint>,
    pub left_shoulder: Option<Keypoint>,
    pub right_shoulder: Option<Keypoint>,
    pub left_hip: Option<Keypoint>,
    pub right_hip: Option<Keypoint>,
    /// 两肩都存在时的中点
    pub shoulder_center: Option<Point>,
    /// 两髋都存在时的中点
    pub hip_center: Option<Point>,
    /// 参考关节的平均置信度，缺失按 0 计
    pub confidence: f32,
}

/// 按名称查找关节（同名取第一个）
pub fn find_keypoint(keypoints: &[Keypoint], name: KeypointName) -> Option<Keypoint> {
    keypoints.iter().find(|kp| kp.name == name).copied()
}

fn center_of(a: Option<Keypoint>, b: Option<Keypoint>) -> Option<Point> {
    match (a, b) {
        (Some(a), Some(b)) => Some(midpoint(a.point(), b.point())),
        _ => None,
    }
}

/// 聚合单个人体的关节点
pub fn aggregate(keypoints: &[Keypoint]) -> AggregatedPose {
    let nose = find_keypoint(keypoints, KeypointName::Nose);
    let left_shoulder = find_keypoint(keypoints, KeypointName::LeftShoulder);
    let right_shoulder = find_keypoint(keypoints, KeypointName::RightShoulder);
    let left_hip = find_keypoint(keypoints, KeypointName::LeftHip);
    let right_hip = find_keypoint(keypoints, KeypointName::RightHip);

    let confidence = [nose, left_shoulder, right_shoulder, left_hip, right_hip]
        .iter()
        .map(|kp| kp.map_or(0.0, |kp| kp.confidence))
        .sum::<f32>()
        / REFERENCE_JOINTS.len() as f32;

    AggregatedPose {
        nose,
        left_shoulder,
        right_shoulder,
        left_hip,
        right_hip,
        shoulder_center: center_of(left_shoulder, right_shoulder),
        hip_center: center_of(left_hip, right_hip),
        confidence,
    }
}
