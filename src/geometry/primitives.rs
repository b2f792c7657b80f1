use super::color::Color;
use super::vertex::Vertex;

/// 点图元
#[derive(Debug, Clone, Copy)]
pub struct Point {
    pub v: Vertex,
    /// 被裁剪或剔除的图元只做标记，不从列表中移除
    pub rejected: bool,
}

/// 线段图元
#[derive(Debug, Clone, Copy)]
pub struct Line {
    pub v1: Vertex,
    pub v2: Vertex,
    pub rejected: bool,
}

/// 三角形图元
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub v1: Vertex,
    pub v2: Vertex,
    pub v3: Vertex,
    pub rejected: bool,
}

impl Point {
    pub fn new(v: Vertex) -> Self {
        Self { v, rejected: false }
    }
}

impl Line {
    pub fn new(v1: Vertex, v2: Vertex) -> Self {
        Self {
            v1,
            v2,
            rejected: false,
        }
    }
}

impl Triangle {
    pub fn new(v1: Vertex, v2: Vertex, v3: Vertex) -> Self {
        Self {
            v1,
            v2,
            v3,
            rejected: false,
        }
    }

    pub fn vertices(&self) -> [Vertex; 3] {
        [self.v1, self.v2, self.v3]
    }

    pub fn vertices_mut(&mut self) -> [&mut Vertex; 3] {
        [&mut self.v1, &mut self.v2, &mut self.v3]
    }
}

/// 光栅化产生的片元，只在一次 `render` 调用内存在
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub x: i32,
    pub y: i32,
    pub depth: f32,
    pub color: Color,
}

impl Fragment {
    /// 由光栅器当前的插值顶点生成片元
    ///
    /// 深度取除以 `one` 之前的 z（即屏幕空间线性的 z/w），颜色取透视校正后的值。
    pub fn from_interpolated(x: i32, y: i32, vertex: &Vertex) -> Self {
        Self {
            x,
            y,
            depth: vertex.pos.z,
            color: vertex.perspective_corrected().col,
        }
    }
}
