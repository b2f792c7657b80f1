use crate::geometry::transform::snap;
use crate::geometry::vertex::Vertex;
use nalgebra::Point2;

/// 主轴：每一步沿主轴前进一个像素
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DominantAxis {
    X,
    Y,
}

/// 增量式（Bresenham 风格）线段扫描转换器
///
/// 计算最接近理想线段的像素，同时对顶点属性做屏幕空间线性插值。
/// 两个端点都会被输出；起点与终点在主轴上重合时不产生任何像素。
#[derive(Debug, Clone)]
pub struct LineRasterizer {
    x_current: i32,
    y_current: i32,
    x_stop: i32,
    y_stop: i32,

    /// 2|dx| 和 2|dy|
    abs_2dx: i32,
    abs_2dy: i32,

    /// 决策变量，决定次轴是否前进
    d: i32,

    x_step: i32,
    y_step: i32,

    /// 沿主轴正方向扫描时为 true，用于 d == 0 时的平局裁决
    left_right: bool,
    valid: bool,
    axis: DominantAxis,

    current: Vertex,
    step: Vertex,
}

impl LineRasterizer {
    pub fn new(start: Vertex, stop: Vertex) -> Self {
        let x_start = snap(start.pos.x);
        let y_start = snap(start.pos.y);
        let x_stop = snap(stop.pos.x);
        let y_stop = snap(stop.pos.y);

        let dx = x_stop - x_start;
        let dy = y_stop - y_start;
        let abs_2dx = dx.abs() << 1;
        let abs_2dy = dy.abs() << 1;
        let x_step = if dx < 0 { -1 } else { 1 };
        let y_step = if dy < 0 { -1 } else { 1 };

        let (axis, left_right, d, valid, steps) = if abs_2dx > abs_2dy {
            (
                DominantAxis::X,
                x_step > 0,
                abs_2dy - (abs_2dx >> 1),
                x_start != x_stop,
                dx.abs(),
            )
        } else {
            (
                DominantAxis::Y,
                y_step > 0,
                abs_2dx - (abs_2dy >> 1),
                y_start != y_stop,
                dy.abs(),
            )
        };

        let step = if steps > 0 {
            (stop - start) / steps as f32
        } else {
            Vertex::zero()
        };

        Self {
            x_current: x_start,
            y_current: y_start,
            x_stop,
            y_stop,
            abs_2dx,
            abs_2dy,
            d,
            x_step,
            y_step,
            left_right,
            valid,
            axis,
            current: start,
            step,
        }
    }

    pub fn more_fragments(&self) -> bool {
        self.valid
    }

    pub fn next_fragment(&mut self) {
        match self.axis {
            DominantAxis::X => self.x_dominant_step(),
            DominantAxis::Y => self.y_dominant_step(),
        }
    }

    /// 当前像素的x坐标，仅当 `more_fragments()` 为 true 时有效
    pub fn x(&self) -> i32 {
        if !self.valid {
            panic!("LineRasterizer::x(): invalid state");
        }
        self.x_current
    }

    /// 当前像素的y坐标，仅当 `more_fragments()` 为 true 时有效
    pub fn y(&self) -> i32 {
        if !self.valid {
            panic!("LineRasterizer::y(): invalid state");
        }
        self.y_current
    }

    /// 当前像素处插值得到的顶点（尚未除以 `one`）
    pub fn current(&self) -> Vertex {
        if !self.valid {
            panic!("LineRasterizer::current(): invalid state");
        }
        self.current
    }

    /// 取出剩余的全部像素
    pub fn all_pixels(mut self) -> Vec<Point2<i32>> {
        let mut pixels = Vec::new();
        while self.more_fragments() {
            pixels.push(Point2::new(self.x_current, self.y_current));
            self.next_fragment();
        }
        pixels
    }

    fn x_dominant_step(&mut self) {
        self.valid = self.x_current != self.x_stop;
        if self.valid {
            if self.d > 0 || (self.d == 0 && self.left_right) {
                self.y_current += self.y_step;
                self.d -= self.abs_2dx;
            }
            self.x_current += self.x_step;
            self.d += self.abs_2dy;
            self.current = self.current + self.step;
        }
    }

    fn y_dominant_step(&mut self) {
        self.valid = self.y_current != self.y_stop;
        if self.valid {
            if self.d > 0 || (self.d == 0 && self.left_right) {
                self.x_current += self.x_step;
                self.d -= self.abs_2dy;
            }
            self.y_current += self.y_step;
            self.d += self.abs_2dx;
            self.current = self.current + self.step;
        }
    }
}
