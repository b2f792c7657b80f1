use crate::geometry::vertex::Vertex;
use nalgebra::Vector4;

/// 齐次裁剪空间中标准视景体的六个平面：|x| <= w, |y| <= w, |z| <= w
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipPlane {
    PositiveX,
    PositiveY,
    PositiveZ,
    NegativeX,
    NegativeY,
    NegativeZ,
}

impl ClipPlane {
    pub const ALL: [ClipPlane; 6] = [
        ClipPlane::PositiveX,
        ClipPlane::PositiveY,
        ClipPlane::PositiveZ,
        ClipPlane::NegativeX,
        ClipPlane::NegativeY,
        ClipPlane::NegativeZ,
    ];

    #[inline]
    fn axis(self) -> usize {
        match self {
            ClipPlane::PositiveX | ClipPlane::NegativeX => 0,
            ClipPlane::PositiveY | ClipPlane::NegativeY => 1,
            ClipPlane::PositiveZ | ClipPlane::NegativeZ => 2,
        }
    }

    /// 负平面上 x,y,z 先乘 -1，再与 w 比较
    #[inline]
    fn sign(self) -> f32 {
        match self {
            ClipPlane::PositiveX | ClipPlane::PositiveY | ClipPlane::PositiveZ => 1.0,
            _ => -1.0,
        }
    }

    /// 有符号距离，大于0表示在平面外侧
    #[inline]
    pub fn distance(self, pos: &Vector4<f32>) -> f32 {
        pos[self.axis()] * self.sign() - pos.w
    }

    #[inline]
    pub fn is_outside(self, pos: &Vector4<f32>) -> bool {
        self.distance(pos) > 0.0
    }

    /// 线段 inside -> outside 与平面的交点，在所有顶点字段上插值
    ///
    /// 总是从内侧端点出发计算，公共边在两个相邻多边形中得到相同的交点。
    pub fn intersect(self, inside: &Vertex, outside: &Vertex) -> Vertex {
        let d_in = self.distance(&inside.pos);
        let d_out = self.distance(&outside.pos);
        let t = d_in / (d_in - d_out);
        inside.lerp(outside, t)
    }
}

/// 点是否在视景体之外（只做整体剔除，不做部分裁剪）
pub fn point_outside_volume(pos: &Vector4<f32>) -> bool {
    let w = pos.w.abs();
    pos.x.abs() > w || pos.y.abs() > w || pos.z.abs() > w
}

/// 顶点是否位于全部六个平面内侧
pub fn inside_volume(pos: &Vector4<f32>) -> bool {
    ClipPlane::ALL.iter().all(|plane| !plane.is_outside(pos))
}

/// 用单个平面裁剪线段
///
/// 两端都在外侧返回 false（整条线段被拒绝）；只有一端在外侧时，
/// 把该端点替换为线段与平面的交点。
pub fn clip_line(plane: ClipPlane, v1: &mut Vertex, v2: &mut Vertex) -> bool {
    let out1 = plane.is_outside(&v1.pos);
    let out2 = plane.is_outside(&v2.pos);
    match (out1, out2) {
        (true, true) => false,
        (false, false) => true,
        (true, false) => {
            *v1 = plane.intersect(v2, v1);
            true
        }
        (false, true) => {
            *v2 = plane.intersect(v1, v2);
            true
        }
    }
}

/// Sutherland–Hodgman：用单个平面裁剪凸多边形，结果写入 `output`
pub fn clip_polygon_against(plane: ClipPlane, input: &[Vertex], output: &mut Vec<Vertex>) {
    output.clear();
    let count = input.len();
    for i in 0..count {
        let current = &input[i];
        let next = &input[(i + 1) % count];
        let current_in = !plane.is_outside(&current.pos);
        let next_in = !plane.is_outside(&next.pos);

        if current_in {
            output.push(*current);
        }
        match (current_in, next_in) {
            (true, false) => output.push(plane.intersect(current, next)),
            (false, true) => output.push(plane.intersect(next, current)),
            _ => {}
        }
    }
}

/// 依次用六个平面裁剪三角形，返回裁剪后的凸多边形（最多9个顶点，可能为空）
pub fn clip_triangle(vertices: [Vertex; 3]) -> Vec<Vertex> {
    let mut polygon = Vec::with_capacity(9);
    polygon.extend_from_slice(&vertices);
    let mut scratch = Vec::with_capacity(9);

    for plane in ClipPlane::ALL {
        if polygon.len() < 3 {
            polygon.clear();
            break;
        }
        clip_polygon_against(plane, &polygon, &mut scratch);
        std::mem::swap(&mut polygon, &mut scratch);
    }

    if polygon.len() < 3 {
        polygon.clear();
    }
    polygon
}

/// 以第一个顶点为中心把凸多边形剖分成三角形扇，保持原有环绕方向
pub fn fan_triangulate(polygon: &[Vertex]) -> Vec<[Vertex; 3]> {
    if polygon.len() < 3 {
        return Vec::new();
    }
    (1..polygon.len() - 1)
        .map(|k| [polygon[0], polygon[k], polygon[k + 1]])
        .collect()
}
