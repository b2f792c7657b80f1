use crate::core::clipping::point_outside_volume;
use crate::core::renderer::{PrimitiveProcessor, PrimitiveStats};
use crate::geometry::primitives::{Fragment, Point};
use crate::geometry::transform::{ndc_to_screen, snap};
use crate::geometry::vertex::Vertex;

/// 点图元阶段：每个顶点一个点，每个点至多一个片元
#[derive(Debug, Clone)]
pub struct PointProcessor {
    pub clip_to_frustum: bool,
    primitives: Vec<Point>,
}

impl Default for PointProcessor {
    fn default() -> Self {
        Self {
            clip_to_frustum: true,
            primitives: Vec::new(),
        }
    }
}

impl PointProcessor {
    pub fn with_clipping(mut self, clip_to_frustum: bool) -> Self {
        self.clip_to_frustum = clip_to_frustum;
        self
    }

    fn assemble_primitives(&mut self, vertices: &[Vertex]) {
        self.primitives.clear();
        self.primitives.reserve(vertices.len());
        self.primitives.extend(vertices.iter().copied().map(Point::new));
    }

    /// 点不做部分裁剪，任一坐标超出 |w| 即整体拒绝
    fn clip_primitives(&mut self) {
        for point in self.primitives.iter_mut() {
            if point_outside_volume(&point.v.pos) {
                point.rejected = true;
            }
        }
    }

    fn divide_by_w(&mut self) {
        for point in self.primitives.iter_mut().filter(|p| !p.rejected) {
            point.v = point.v.divide_by_w();
        }
    }

    fn to_screen_space(&mut self, width: u32, height: u32) {
        for point in self.primitives.iter_mut().filter(|p| !p.rejected) {
            ndc_to_screen(&mut point.v, width, height);
        }
    }

    fn raster_primitives(&self, fragments: &mut Vec<Fragment>) -> usize {
        fragments.reserve(self.primitives.len());
        let mut rasterized = 0;
        for point in self.primitives.iter().filter(|p| !p.rejected) {
            let v = &point.v;
            fragments.push(Fragment::from_interpolated(
                snap(v.pos.x),
                snap(v.pos.y),
                v,
            ));
            rasterized += 1;
        }
        rasterized
    }
}

impl PrimitiveProcessor for PointProcessor {
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

        // 点不做背面剔除
        let rasterized = self.raster_primitives(fragments);

        PrimitiveStats {
            rasterized,
            rejected: self.primitives.len() - rasterized,
        }
    }
}
