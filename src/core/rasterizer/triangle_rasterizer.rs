use super::edge_rasterizer::EdgeRasterizer;
use crate::geometry::transform::pixel_of;
use crate::geometry::vertex::Vertex;
use nalgebra::Point2;

/// 屏幕空间整数点 a->b 与 a->c 叉积的z分量（有向面积的两倍）
///
/// 三角形建立与背面剔除共用这一个判定。
#[inline]
pub fn signed_area(a: Point2<i32>, b: Point2<i32>, c: Point2<i32>) -> i64 {
    let u = b - a;
    let v = c - a;
    u.x as i64 * v.y as i64 - u.y as i64 * v.x as i64
}

/// 三角形扫描转换器
///
/// 用左右两个边光栅器逐扫描线推进，扫描线内从左边界走到右边界减一，
/// 并在两条边已插值（已除以w、尚未除以 `one`）的顶点之间做线性插值。
#[derive(Debug, Clone)]
pub struct TriangleRasterizer {
    left_edge: EdgeRasterizer,
    right_edge: EdgeRasterizer,

    x_start: i32,
    x_stop: i32,
    x_current: i32,
    y_current: i32,

    valid: bool,

    current: Vertex,
    step: Vertex,
}

impl TriangleRasterizer {
    pub fn new(v1: Vertex, v2: Vertex, v3: Vertex) -> Self {
        let mut rasterizer = Self {
            left_edge: EdgeRasterizer::new(),
            right_edge: EdgeRasterizer::new(),
            x_start: 0,
            x_stop: -1,
            x_current: 0,
            y_current: 0,
            valid: false,
            current: Vertex::default(),
            step: Vertex::zero(),
        };
        rasterizer.initialize_triangle([v1, v2, v3]);
        rasterizer
    }

    pub fn more_fragments(&self) -> bool {
        self.valid
    }

    pub fn next_fragment(&mut self) {
        if self.x_current < self.x_stop {
            self.x_current += 1;
            self.current = self.current + self.step;
        } else {
            self.left_edge.next_fragment();
            self.right_edge.next_fragment();
            self.skip_empty_scanlines();
        }
    }

    /// 当前像素的x坐标，仅当 `more_fragments()` 为 true 时有效
    pub fn x(&self) -> i32 {
        if !self.valid {
            panic!("TriangleRasterizer::x(): invalid state");
        }
        self.x_current
    }

    /// 当前像素的y坐标，仅当 `more_fragments()` 为 true 时有效
    pub fn y(&self) -> i32 {
        if !self.valid {
            panic!("TriangleRasterizer::y(): invalid state");
        }
        self.y_current
    }

    /// 当前像素处插值得到的顶点（尚未除以 `one`）
    pub fn current(&self) -> Vertex {
        if !self.valid {
            panic!("TriangleRasterizer::current(): invalid state");
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

    fn initialize_triangle(&mut self, vertices: [Vertex; 3]) {
        let ivertex = vertices.map(|v| pixel_of(&v));

        let lower_left = lower_left_index(&ivertex);
        let upper_left = upper_left_index(&ivertex);
        let the_other = 3 - lower_left - upper_left;

        let (ll, ul, ot) = (
            vertices[lower_left],
            vertices[upper_left],
            vertices[the_other],
        );

        // u = lower_left -> upper_left，v = lower_left -> the_other
        // 叉积为正说明 the_other 在长边 u 的左侧
        let cross = signed_area(
            ivertex[lower_left],
            ivertex[upper_left],
            ivertex[the_other],
        );

        if cross == 0 {
            // 退化三角形
            self.valid = false;
            return;
        }

        if cross > 0 {
            self.left_edge.init_chain(ll, ot, ul);
            self.right_edge.init(ll, ul);
        } else {
            self.left_edge.init(ll, ul);
            self.right_edge.init_chain(ll, ot, ul);
        }

        self.skip_empty_scanlines();
    }

    /// 跳过空扫描线，并为找到的第一条非空扫描线准备插值
    fn skip_empty_scanlines(&mut self) {
        while self.edges_valid() && self.left_edge.x() >= self.right_edge.x() {
            self.left_edge.next_fragment();
            self.right_edge.next_fragment();
        }

        self.valid = self.edges_valid();
        if self.valid {
            self.x_start = self.left_edge.x();
            self.x_current = self.x_start;
            self.x_stop = self.right_edge.x() - 1;
            self.y_current = self.left_edge.y();

            let left = self.left_edge.current();
            let right = self.right_edge.current();
            self.current = left;
            self.step = (right - left) / (self.x_stop - self.x_start + 1) as f32;
        }
    }

    fn edges_valid(&self) -> bool {
        self.left_edge.more_fragments() && self.right_edge.more_fragments()
    }
}

/// y 最小（相同时x最小）的顶点
fn lower_left_index(ivertex: &[Point2<i32>; 3]) -> usize {
    let mut ll = 0;
    for i in 1..3 {
        if ivertex[i].y < ivertex[ll].y
            || (ivertex[i].y == ivertex[ll].y && ivertex[i].x < ivertex[ll].x)
        {
            ll = i;
        }
    }
    ll
}

/// y 最大（相同时x最小）的顶点
fn upper_left_index(ivertex: &[Point2<i32>; 3]) -> usize {
    let mut ul = 0;
    for i in 1..3 {
        if ivertex[i].y > ivertex[ul].y
            || (ivertex[i].y == ivertex[ul].y && ivertex[i].x < ivertex[ul].x)
        {
            ul = i;
        }
    }
    ul
}
