use crate::core::clipping::{ClipPlane, clip_line};
use crate::core::rasterizer::LineRasterizer;
use crate::core::renderer::{PrimitiveProcessor, PrimitiveStats};
use crate::geometry::primitives::{Fragment, Line};
use crate::geometry::transform::ndc_to_screen;
use crate::geometry::vertex::Vertex;

/// 线段图元阶段
///
/// 普通模式下每两个顶点组成一条线段；线框模式下每三个顶点视为一个三角形，
/// 展开为它的三条边。
#[derive(Debug, Clone)]
pub struct LineProcessor {
    pub clip_to_frustum: bool,
    pub wireframe: bool,
    primitives: Vec<Line>,
}

impl Default for LineProcessor {
    fn default() -> Self {
        Self {
            clip_to_frustum: true,
            wireframe: false,
            primitives: Vec::new(),
        }
    }
}

impl LineProcessor {
    pub fn with_clipping(mut self, clip_to_frustum: bool) -> Self {
        self.clip_to_frustum = clip_to_frustum;
        self
    }

    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    fn assemble_primitives(&mut self, vertices: &[Vertex]) {
        self.primitives.clear();
        if self.wireframe {
            self.primitives.reserve(vertices.len() / 3 * 3);
            for tri in vertices.chunks_exact(3) {
                self.primitives.push(Line::new(tri[0], tri[1]));
                self.primitives.push(Line::new(tri[1], tri[2]));
                self.primitives.push(Line::new(tri[2], tri[0]));
            }
        } else {
            self.primitives.reserve(vertices.len() / 2);
            self.primitives.extend(
                vertices
                    .chunks_exact(2)
                    .map(|pair| Line::new(pair[0], pair[1])),
            );
        }
    }

    /// 依次用六个平面裁剪，每个平面遍历一次所有未被拒绝的线段
    fn clip_primitives(&mut self) {
        for plane in ClipPlane::ALL {
            for line in self.primitives.iter_mut().filter(|l| !l.rejected) {
                if !clip_line(plane, &mut line.v1, &mut line.v2) {
                    line.rejected = true;
                }
            }
        }
    }

    fn divide_by_w(&mut self) {
        for line in self.primitives.iter_mut().filter(|l| !l.rejected) {
            line.v1 = line.v1.divide_by_w();
            line.v2 = line.v2.divide_by_w();
        }
    }

    fn to_screen_space(&mut self, width: u32, height: u32) {
        for line in self.primitives.iter_mut().filter(|l| !l.rejected) {
            ndc_to_screen(&mut line.v1, width, height);
            ndc_to_screen(&mut line.v2, width, height);
        }
    }

    fn raster_primitives(&self, fragments: &mut Vec<Fragment>) -> usize {
        let mut rasterized = 0;
        for line in self.primitives.iter().filter(|l| !l.rejected) {
            let mut rasterizer = LineRasterizer::new(line.v1, line.v2);
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

impl PrimitiveProcessor for LineProcessor {
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

        // 线段不做背面剔除
        let rasterized = self.raster_primitives(fragments);

        PrimitiveStats {
            rasterized,
            rejected: self.primitives.len() - rasterized,
        }
    }
}
