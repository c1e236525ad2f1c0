//! 角度信号映射
//!
//! 把聚合后的关节点转换为三个姿势信号：
//! - 颈部角度：肩中点处，鼻子与正上方参考点的夹角
//! - 肩部不对称：左右肩 x 坐标差的绝对值（位置差，不是真实旋转角）
//! - 躯干角度：髋中点处，肩中点与正下方参考点的夹角
//!
//! 置信度低时仍然返回数值，是否采信由引擎根据置信度决定。

use super::aggregator::AggregatedPose;
use super::geometry::angle_between;
use crate::models::{Keypoint, Point, PostureSignals};

/// 垂直参考点到中心点的距离（像素）
const VERTICAL_REFERENCE_OFFSET: f32 = 100.0;

/// 中点缺失时用单侧关节代替，两侧都缺失则取原点
fn center_or_side(center: Option<Point>, left: Option<Keypoint>, right: Option<Keypoint>) -> Point {
    center
        .or_else(|| left.or(right).map(|kp| kp.point()))
        .unwrap_or_default()
}

/// 计算姿势信号
pub fn compute_signals(pose: &AggregatedPose) -> PostureSignals {
    let shoulder_center =
        center_or_side(pose.shoulder_center, pose.left_shoulder, pose.right_shoulder);
    let hip_center = center_or_side(pose.hip_center, pose.left_hip, pose.right_hip);
    let nose = pose.nose.map(|kp| kp.point()).unwrap_or_default();

    // 图像坐标系 y 轴向下
    let above_shoulders = Point::new(
        shoulder_center.x,
        shoulder_center.y - VERTICAL_REFERENCE_OFFSET,
    );
    let below_hips = Point::new(hip_center.x, hip_center.y + VERTICAL_REFERENCE_OFFSET);

    let neck_angle = angle_between(nose, shoulder_center, above_shoulders);
    let trunk_angle = angle_between(shoulder_center, hip_center, below_hips);

    let shoulder_asymmetry = match (pose.left_shoulder, pose.right_shoulder) {
        (Some(left), Some(right)) => (left.x - right.x).abs(),
        _ => 0.0,
    };

    PostureSignals {
        neck_angle,
        shoulder_asymmetry,
        trunk_angle,
        confidence: pose.confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregator::aggregate;
    use crate::models::KeypointName;

    fn body(nose: (f32, f32), shoulders: (f32, f32, f32), hips: (f32, f32, f32)) -> Vec<Keypoint> {
        vec![
            Keypoint::new(KeypointName::Nose, nose.0, nose.1, 0.9),
            Keypoint::new(KeypointName::LeftShoulder, shoulders.0, shoulders.2, 0.9),
            Keypoint::new(KeypointName::RightShoulder, shoulders.1, shoulders.2, 0.9),
            Keypoint::new(KeypointName::LeftHip, hips.0, hips.2, 0.9),
            Keypoint::new(KeypointName::RightHip, hips.1, hips.2, 0.9),
        ]
    }

    #[test]
    fn test_upright_body() {
        let keypoints = body((100.0, 40.0), (80.0, 120.0, 150.0), (90.0, 110.0, 350.0));
        let signals = compute_signals(&aggregate(&keypoints));

        assert!(signals.neck_angle.abs() < 0.01);
        assert!((signals.trunk_angle - 180.0).abs() < 0.01);
        assert!((signals.shoulder_asymmetry - 40.0).abs() < 0.01);
        assert!((signals.confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_head_forward() {
        // 鼻子在肩中点右上方 45 度
        let keypoints = body((150.0, 100.0), (90.0, 110.0, 150.0), (90.0, 110.0, 350.0));
        let signals = compute_signals(&aggregate(&keypoints));

        assert!((signals.neck_angle - 45.0).abs() < 0.01);
        assert!((signals.shoulder_asymmetry - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_trunk_lean() {
        // 肩中点相对髋中点前移，躯干角度小于 180
        let keypoints = body((200.0, 50.0), (190.0, 210.0, 100.0), (90.0, 110.0, 300.0));
        let signals = compute_signals(&aggregate(&keypoints));

        let expected = 180.0 - (100.0f32 / 200.0).atan().to_degrees();
        assert!((signals.trunk_angle - expected).abs() < 0.01);
        assert!(signals.trunk_angle < 160.0);
    }

    #[test]
    fn test_missing_joints_still_numeric() {
        let keypoints = vec![Keypoint::new(KeypointName::LeftShoulder, 50.0, 50.0, 0.5)];
        let signals = compute_signals(&aggregate(&keypoints));

        assert!(signals.neck_angle.is_finite());
        assert!(signals.trunk_angle.is_finite());
        assert_eq!(signals.shoulder_asymmetry, 0.0);
        assert!((signals.confidence - 0.1).abs() < 1e-6);
    }
}
