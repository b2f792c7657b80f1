use super::vertex::Vertex;
use nalgebra::{Matrix4, Point2, Point3, Unit, Vector3};

/// 变换矩阵工厂，提供创建各种变换矩阵的静态方法
pub struct TransformFactory;
impl TransformFactory {
    /// 由欧拉角（弧度）创建旋转矩阵
    pub fn rotation_euler(roll: f32, pitch: f32, yaw: f32) -> Matrix4<f32> {
        Matrix4::from_euler_angles(roll, pitch, yaw)
    }

    /// 平移矩阵
    pub fn translation(offset: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_translation(offset)
    }

    /// 创建均匀缩放矩阵
    pub fn scaling(scale: f32) -> Matrix4<f32> {
        Matrix4::new_scaling(scale)
    }

    /// 创建视图矩阵 (lookAt)
    pub fn view(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::look_at_rh(eye, target, &Unit::new_normalize(*up))
    }

    /// 创建透视投影矩阵（OpenGL 约定，NDC 深度范围 [-1, 1]）
    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        Matrix4::new_perspective(aspect_ratio, fov_y_rad, near, far)
    }
}

/// 将NDC坐标转换为屏幕像素坐标，z 保持为归一化深度
///
/// 先按半宽/半高缩放再平移；翻转Y轴：NDC中+1是顶部，屏幕坐标中0是顶部。
#[inline]
pub fn ndc_to_screen(vertex: &mut Vertex, width: u32, height: u32) {
    let half_w = width as f32 * 0.5;
    let half_h = height as f32 * 0.5;
    vertex.pos.x = (vertex.pos.x + 1.0) * half_w;
    vertex.pos.y = (1.0 - vertex.pos.y) * half_h;
}

/// 将屏幕坐标吸附到最近的整数像素（0.5 向上取整）
#[inline]
pub fn snap(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

/// 顶点在屏幕上对应的整数像素位置
#[inline]
pub fn pixel_of(vertex: &Vertex) -> Point2<i32> {
    Point2::new(snap(vertex.pos.x), snap(vertex.pos.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::color::{Color, ColorExt};

    #[test]
    fn ndc_corners_map_to_screen_corners() {
        let mut top_left = Vertex::from_xyz(-1.0, 1.0, 0.3, Color::white());
        ndc_to_screen(&mut top_left, 64, 32);
        assert_eq!(top_left.pos.x, 0.0);
        assert_eq!(top_left.pos.y, 0.0);
        assert_eq!(top_left.pos.z, 0.3);

        let mut bottom_right = Vertex::from_xyz(1.0, -1.0, 0.0, Color::white());
        ndc_to_screen(&mut bottom_right, 64, 32);
        assert_eq!(bottom_right.pos.x, 64.0);
        assert_eq!(bottom_right.pos.y, 32.0);
    }

    #[test]
    fn model_matrices_compose_scale_then_translate() {
        let model = TransformFactory::translation(&Vector3::new(0.0, -1.0, 2.0))
            * TransformFactory::scaling(0.5);
        let p = model * nalgebra::Vector4::new(2.0, 2.0, 2.0, 1.0);
        assert_eq!(p, nalgebra::Vector4::new(1.0, 0.0, 3.0, 1.0));
    }

    #[test]
    fn snapping_rounds_half_up() {
        assert_eq!(snap(0.49), 0);
        assert_eq!(snap(0.5), 1);
        assert_eq!(snap(-0.4), 0);
        assert_eq!(snap(-0.6), -1);
    }
}
