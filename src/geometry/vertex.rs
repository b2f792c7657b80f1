use super::color::Color;
use nalgebra::Vector4;
use std::ops::{Add, Div, Mul, Sub};

/// 管线中流动的顶点
///
/// 所有字段（包括 `one`）都参与加减与数乘。透视除法时整个顶点除以 w，
/// 于是屏幕空间线性插值得到的是 `属性/w` 与 `1/w`（保存在 `one` 中），
/// 再除以插值后的 `one` 就恢复了透视正确的属性值。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// 齐次坐标 (x, y, z, w)
    pub pos: Vector4<f32>,
    pub col: Color,
    /// 双曲插值用的辅助量，初始为 1
    pub one: f32,
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            pos: Vector4::zeros(),
            col: Color::default(),
            one: 1.0,
        }
    }
}

impl Vertex {
    pub fn new(pos: Vector4<f32>, col: Color) -> Self {
        Self { pos, col, one: 1.0 }
    }

    /// 所有字段为0的顶点，作为插值步长的零值
    pub fn zero() -> Self {
        Self {
            pos: Vector4::zeros(),
            col: Color::default(),
            one: 0.0,
        }
    }

    /// 由三维位置构造，w = 1
    pub fn from_xyz(x: f32, y: f32, z: f32, col: Color) -> Self {
        Self::new(Vector4::new(x, y, z, 1.0), col)
    }

    /// 在所有字段上线性插值，t = 0 返回 self，t = 1 返回 other
    pub fn lerp(&self, other: &Vertex, t: f32) -> Vertex {
        *self + (*other - *self) * t
    }

    /// 透视除法：整个顶点除以自身的 w
    pub fn divide_by_w(&self) -> Vertex {
        *self / self.pos.w
    }

    /// 双曲插值的最后一步：除以插值得到的 `one`
    pub fn perspective_corrected(&self) -> Vertex {
        *self / self.one
    }
}

impl Add for Vertex {
    type Output = Vertex;

    fn add(self, rhs: Vertex) -> Vertex {
        Vertex {
            pos: self.pos + rhs.pos,
            col: self.col + rhs.col,
            one: self.one + rhs.one,
        }
    }
}

impl Sub for Vertex {
    type Output = Vertex;

    fn sub(self, rhs: Vertex) -> Vertex {
        Vertex {
            pos: self.pos - rhs.pos,
            col: self.col - rhs.col,
            one: self.one - rhs.one,
        }
    }
}

impl Mul<f32> for Vertex {
    type Output = Vertex;

    fn mul(self, s: f32) -> Vertex {
        Vertex {
            pos: self.pos * s,
            col: self.col * s,
            one: self.one * s,
        }
    }
}

impl Div<f32> for Vertex {
    type Output = Vertex;

    fn div(self, s: f32) -> Vertex {
        Vertex {
            pos: self.pos / s,
            col: self.col / s,
            one: self.one / s,
        }
    }
}
