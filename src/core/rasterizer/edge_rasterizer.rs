use crate::geometry::transform::snap;
use crate::geometry::vertex::Vertex;

/// 多边形边的扫描转换器
///
/// 每条扫描线给出一个像素，取理想边上或其右侧最近的像素（即 x 向上取整）。
/// 这种方向性偏置保证相邻三角形的公共边既不重复覆盖也不留缝。
/// 可以用一条边或首尾相接的两条边初始化，y 必须单调递增；水平边在初始化时被跳过。
#[derive(Debug, Clone)]
pub struct EdgeRasterizer {
    /// 仍有第二条边等待扫描
    two_edges: bool,

    x_current: i32,
    y_current: i32,
    y_stop: i32,
    x_step: i32,

    numerator: i32,
    denominator: i32,
    accumulator: i32,

    valid: bool,

    v1: Vertex,
    v2: Vertex,
    v3: Vertex,

    current: Vertex,
    step: Vertex,
}

impl Default for EdgeRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeRasterizer {
    /// 创建一个空的（无像素的）边光栅器
    pub fn new() -> Self {
        Self {
            two_edges: false,
            x_current: 0,
            y_current: 0,
            y_stop: 0,
            x_step: 1,
            numerator: 0,
            denominator: 0,
            accumulator: 0,
            valid: false,
            v1: Vertex::default(),
            v2: Vertex::default(),
            v3: Vertex::default(),
            current: Vertex::default(),
            step: Vertex::zero(),
        }
    }

    /// 用一条边 v1 -> v2 初始化
    pub fn init(&mut self, v1: Vertex, v2: Vertex) {
        self.v1 = v1;
        self.v2 = v2;
        self.two_edges = false;
        self.init_edge(v1, v2);
    }

    /// 用两条边 v1 -> v2 -> v3 初始化
    pub fn init_chain(&mut self, v1: Vertex, v2: Vertex, v3: Vertex) {
        self.v1 = v1;
        self.v2 = v2;
        self.v3 = v3;
        self.two_edges = true;

        let horizontal = !self.init_edge(v1, v2);
        if horizontal {
            self.two_edges = false;
            self.init_edge(v2, v3);
        }
    }

    pub fn more_fragments(&self) -> bool {
        self.valid
    }

    pub fn next_fragment(&mut self) {
        self.current = self.current + self.step;
        self.y_current += 1;

        if self.y_current < self.y_stop {
            self.update_edge();
        } else if self.two_edges {
            self.two_edges = false;
            self.init_edge(self.v2, self.v3);
        }
        self.valid = self.y_current < self.y_stop;
    }

    /// 当前扫描线上边的x坐标，仅当 `more_fragments()` 为 true 时有效
    pub fn x(&self) -> i32 {
        if !self.valid {
            panic!("EdgeRasterizer::x(): invalid state");
        }
        self.x_current
    }

    /// 当前扫描线的y坐标，仅当 `more_fragments()` 为 true 时有效
    pub fn y(&self) -> i32 {
        if !self.valid {
            panic!("EdgeRasterizer::y(): invalid state");
        }
        self.y_current
    }

    /// 当前扫描线处边上插值得到的顶点
    pub fn current(&self) -> Vertex {
        if !self.valid {
            panic!("EdgeRasterizer::current(): invalid state");
        }
        self.current
    }

    /// 初始化单条边，水平边返回 false
    fn init_edge(&mut self, v1: Vertex, v2: Vertex) -> bool {
        let x_start = snap(v1.pos.x);
        let y_start = snap(v1.pos.y);
        let x_stop = snap(v2.pos.x);
        let y_stop = snap(v2.pos.y);

        self.x_current = x_start;
        self.y_current = y_start;
        self.y_stop = y_stop;

        let dx = x_stop - x_start;
        let dy = y_stop - y_start;

        self.x_step = if dx < 0 { -1 } else { 1 };
        self.numerator = dx.abs();
        // dy > 0
        self.denominator = dy.abs();
        self.accumulator = if self.x_step > 0 { self.denominator } else { 1 };

        self.valid = self.y_current < self.y_stop;

        self.current = v1;
        self.step = if self.valid {
            (v2 - v1) / dy as f32
        } else {
            Vertex::zero()
        };

        self.valid
    }

    fn update_edge(&mut self) {
        self.accumulator += self.numerator;
        while self.accumulator > self.denominator {
            self.x_current += self.x_step;
            self.accumulator -= self.denominator;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::color::{Color, ColorExt};

    fn vtx(x: f32, y: f32) -> Vertex {
        Vertex::from_xyz(x, y, 0.0, Color::white())
    }

    fn drain(mut edge: EdgeRasterizer) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        while edge.more_fragments() {
            out.push((edge.x(), edge.y()));
            edge.next_fragment();
        }
        out
    }

    #[test]
    fn steep_edge_rounds_x_up() {
        let mut edge = EdgeRasterizer::new();
        edge.init(vtx(0.0, 0.0), vtx(1.0, 4.0));
        // 理想x为 0, 0.25, 0.5, 0.75，向右取整，终点所在扫描线不输出
        assert_eq!(drain(edge), vec![(0, 0), (1, 1), (1, 2), (1, 3)]);
    }

    #[test]
    fn leftward_edge_rounds_x_up() {
        let mut edge = EdgeRasterizer::new();
        edge.init(vtx(0.0, 0.0), vtx(-3.0, 2.0));
        // 理想x为 0, -1.5
        assert_eq!(drain(edge), vec![(0, 0), (-1, 1)]);
    }

    #[test]
    fn chain_continues_with_second_edge() {
        let mut edge = EdgeRasterizer::new();
        edge.init_chain(vtx(0.0, 0.0), vtx(2.0, 2.0), vtx(0.0, 4.0));
        assert_eq!(drain(edge), vec![(0, 0), (1, 1), (2, 2), (1, 3)]);
    }

    #[test]
    fn horizontal_first_edge_is_skipped() {
        let mut edge = EdgeRasterizer::new();
        edge.init_chain(vtx(0.0, 0.0), vtx(4.0, 0.0), vtx(0.0, 4.0));
        assert_eq!(drain(edge), vec![(4, 0), (3, 1), (2, 2), (1, 3)]);
    }

    #[test]
    fn horizontal_single_edge_has_no_fragments() {
        let mut edge = EdgeRasterizer::new();
        edge.init(vtx(0.0, 2.0), vtx(5.0, 2.0));
        assert!(!edge.more_fragments());
    }

    #[test]
    #[should_panic(expected = "invalid state")]
    fn empty_edge_panics_on_query() {
        let edge = EdgeRasterizer::new();
        let _ = edge.y();
    }
}
