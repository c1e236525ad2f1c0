//! 二维几何工具

use crate::models::Point;

/// 计算 `vertex` 处由 `a`、`b` 两条射线构成的夹角（度）
///
/// 使用点积公式 cos(θ) = (v1 · v2) / (|v1| × |v2|)，余弦值先限制在 [-1, 1]
/// 再求反余弦。任一射线长度为 0 时返回 0。
pub fn angle_between(a: Point, vertex: Point, b: Point) -> f32 {
    let v1 = (a.x - vertex.x, a.y - vertex.y);
    let v2 = (b.x - vertex.x, b.y - vertex.y);

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();

    if mag1 < f32::EPSILON || mag2 < f32::EPSILON {
        return 0.0;
    }

    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// 两点中点
pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_angle() {
        let angle = angle_between(Point::new(1.0, 0.0), Point::new(0.0, 0.0), Point::new(0.0, 1.0));
        assert!((angle - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_straight_line() {
        let angle = angle_between(
            Point::new(0.0, -100.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 100.0),
        );
        assert!((angle - 180.0).abs() < 0.01);
    }

    #[test]
    fn test_collinear_large_values_stay_finite() {
        // 浮点误差可能让余弦略大于 1
        let angle = angle_between(
            Point::new(1e7, 3e7),
            Point::new(0.0, 0.0),
            Point::new(2e7, 6e7),
        );
        assert!(angle.is_finite());
        assert!(angle < 0.1);
    }

    #[test]
    fn test_degenerate_ray() {
        let p = Point::new(5.0, 5.0);
        assert_eq!(angle_between(p, p, Point::new(0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_midpoint() {
        let m = midpoint(Point::new(0.0, 10.0), Point::new(20.0, 30.0));
        assert_eq!(m, Point::new(10.0, 20.0));
    }
}
