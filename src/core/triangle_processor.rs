use crate::core::clipping::{clip_triangle, fan_triangulate, inside_volume};
use crate::core::rasterizer::{TriangleRasterizer, signed_area};
use crate::core::renderer::{PrimitiveProcessor, PrimitiveStats};
use crate::geometry::primitives::{Fragment, Triangle};
use crate::geometry::transform::{ndc_to_screen, pixel_of};
use crate::geometry::vertex::Vertex;

/// 三角形图元阶段
///
/// 正面为NDC中的逆时针环绕。视口变换翻转了y轴，因此正面三角形在屏幕空间的
/// 有向面积为负。
#[derive(Debug, Clone)]
pub struct TriangleProcessor {
    pub clip_to_frustum: bool,
    pub cull_back_faces: bool,
    primitives: Vec<Triangle>,
}

impl Default for TriangleProcessor {
    fn default() -> Self {
        Self {
            clip_to_frustum: true,
            cull_back_faces: true,
            primitives: Vec::new(),
        }
    }
}

impl TriangleProcessor {
    pub fn with_clipping(mut self, clip_to_frustum: bool) -> Self {
        self.clip_to_frustum = clip_to_frustum;
        self
    }

    pub fn with_backface_culling(mut self, cull_back_faces: bool) -> Self {
        self.cull_back_faces = cull_back_faces;
        self
    }

    fn assemble_primitives(&mut self, vertices: &[Vertex]) {
        self.primitives.clear();
        self.primitives.reserve(vertices.len() / 3);
        self.primitives.extend(
            vertices
                .chunks_exact(3)
                .map(|tri| Triangle::new(tri[0], tri[1], tri[2])),
        );
    }

    /// 与视景体相交的三角形被裁剪成凸多边形，再剖分成三角形扇追加到列表末尾；
    /// 原三角形只标记为拒绝，保持已有索引不变。
    fn clip_primitives(&mut self) {
        let original_count = self.primitives.len();
        for i in 0..original_count {
            let triangle = self.primitives[i];
            if triangle.vertices().iter().all(|v| inside_volume(&v.pos)) {
                continue;
            }

            self.primitives[i].rejected = true;
            let polygon = clip_triangle(triangle.vertices());
            for [v1, v2, v3] in fan_triangulate(&polygon) {
                self.primitives.push(Triangle::new(v1, v2, v3));
            }
        }
    }

    /// 所有参数都除以w，为双曲插值做准备
    fn divide_by_w(&mut self) {
        for triangle in self.primitives.iter_mut().filter(|t| !t.rejected) {
            for v in triangle.vertices_mut() {
                *v = v.divide_by_w();
            }
        }
    }

    fn to_screen_space(&mut self, width: u32, height: u32) {
        for triangle in self.primitives.iter_mut().filter(|t| !t.rejected) {
            for v in triangle.vertices_mut() {
                ndc_to_screen(v, width, height);
            }
        }
    }

    /// 只保留屏幕空间中有向面积为负（即NDC中逆时针）的三角形
    fn backface_culling(&mut self) {
        for triangle in self.primitives.iter_mut().filter(|t| !t.rejected) {
            let area = signed_area(
                pixel_of(&triangle.v1),
                pixel_of(&triangle.v2),
                pixel_of(&triangle.v3),
            );
            if area >= 0 {
                triangle.rejected = true;
            }
        }
    }

    fn raster_primitives(&self, fragments: &mut Vec<Fragment>) -> usize {
        let mut rasterized = 0;
        for triangle in self.primitives.iter().filter(|t| !t.rejected) {
            let mut rasterizer = TriangleRasterizer::new(triangle.v1, triangle.v2, triangle.v3);
            while rasterizer.more_fragments() {
                fragments.push(Fragment::from_interpolated(
                    rasterizer.x(),
                    rasterizer.y(),
                    &rasterizer.current(),
                ));
                rasterizer.next_fragment();
            }
            rasterized += 1;
        }
        rasterized
    }
}

impl PrimitiveProcessor for TriangleProcessor {
    fn process_primitives(
        &mut self,
        vertices: &[Vertex],
        width: u32,
        height: u32,
        fragments: &mut Vec<Fragment>,
    ) -> PrimitiveStats {
        self.assemble_primitives(vertices);

        if self.clip_to_frustum {
            self.clip_primitives();
        }

        self.divide_by_w();
        self.to_screen_space(width, height);

        if self.cull_back_faces {
            self.backface_culling();
        }

        let rasterized = self.raster_primitives(fragments);

        PrimitiveStats {
            rasterized,
            rejected: self.primitives.len() - rasterized,
        }
    }
}
