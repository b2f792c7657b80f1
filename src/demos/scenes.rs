use crate::geometry::color::Color;
use crate::geometry::transform::TransformFactory;
use crate::geometry::vertex::Vertex;
use crate::io::render_settings::{RenderMode, RenderSettings, parse_point3, parse_vec3};
use nalgebra::{Matrix4, Vector3, Vector4};

/// 带索引的网格，三角形在物体外侧看为逆时针
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: &'static str,
    pub positions: Vec<Vector3<f32>>,
    pub colors: Vec<Color>,
    pub indices: Vec<[usize; 3]>,
    /// 物体到世界的变换
    pub model: Matrix4<f32>,
}

impl Mesh {
    /// 边长为2、中心在原点的立方体
    pub fn cube() -> Self {
        let positions = vec![
            Vector3::new(-1.0, -1.0, 1.0),
            Vector3::new(1.0, -1.0, 1.0),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(-1.0, 1.0, 1.0),
            Vector3::new(-1.0, -1.0, -1.0),
            Vector3::new(1.0, -1.0, -1.0),
            Vector3::new(1.0, 1.0, -1.0),
            Vector3::new(-1.0, 1.0, -1.0),
        ];
        let colors = vec![
            Color::new(0.8, 0.5, 0.5, 1.0),
            Color::new(0.8, 0.4, 0.4, 1.0),
            Color::new(0.8, 0.5, 0.5, 1.0),
            Color::new(0.8, 0.6, 0.6, 1.0),
            Color::new(0.8, 0.2, 0.2, 1.0),
            Color::new(0.8, 0.2, 0.2, 1.0),
            Color::new(0.8, 0.2, 0.2, 1.0),
            Color::new(0.8, 0.2, 0.2, 1.0),
        ];
        let indices = vec![
            [0, 1, 2],
            [0, 2, 3],
            [1, 5, 6],
            [1, 6, 2],
            [5, 4, 7],
            [5, 7, 6],
            [4, 0, 3],
            [4, 3, 7],
            [3, 2, 6],
            [3, 6, 7],
            [1, 0, 4],
            [1, 4, 5],
        ];
        Self {
            name: "cube",
            positions,
            colors,
            indices,
            model: Matrix4::identity(),
        }
    }

    /// y = 0 平面上朝上的正方形地面，足够大时会延伸到相机后方
    pub fn ground(half_extent: f32) -> Self {
        let e = half_extent;
        let positions = vec![
            Vector3::new(-e, 0.0, -e),
            Vector3::new(-e, 0.0, e),
            Vector3::new(e, 0.0, e),
            Vector3::new(e, 0.0, -e),
        ];
        let colors = vec![
            Color::new(0.2, 0.3, 0.2, 1.0),
            Color::new(0.4, 0.7, 0.4, 1.0),
            Color::new(0.3, 0.6, 0.7, 1.0),
            Color::new(0.2, 0.3, 0.4, 1.0),
        ];
        Self {
            name: "ground",
            positions,
            colors,
            indices: vec![[0, 1, 2], [0, 2, 3]],
            model: Matrix4::identity(),
        }
    }

    pub fn with_model(mut self, model: Matrix4<f32>) -> Self {
        self.model = model;
        self
    }

    fn vertex(&self, index: usize) -> Vertex {
        let p = self.positions[index];
        Vertex::new(Vector4::new(p.x, p.y, p.z, 1.0), self.colors[index])
    }

    /// 展开为三角形列表（每三个顶点一个三角形）
    pub fn triangle_list(&self) -> Vec<Vertex> {
        self.indices
            .iter()
            .flat_map(|tri| tri.iter().map(|&i| self.vertex(i)))
            .collect()
    }

    /// 展开为不重复的边列表（每两个顶点一条线段）
    pub fn edge_list(&self) -> Vec<Vertex> {
        let mut edges: Vec<(usize, usize)> = Vec::new();
        for tri in &self.indices {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let edge = (a.min(b), a.max(b));
                if !edges.contains(&edge) {
                    edges.push(edge);
                }
            }
        }
        edges
            .into_iter()
            .flat_map(|(a, b)| [self.vertex(a), self.vertex(b)])
            .collect()
    }

    /// 每个位置一个点
    pub fn point_list(&self) -> Vec<Vertex> {
        (0..self.positions.len()).map(|i| self.vertex(i)).collect()
    }

    /// 按渲染模式给出对应的顶点流
    pub fn vertices_for(&self, mode: RenderMode) -> Vec<Vertex> {
        match mode {
            RenderMode::Points => self.point_list(),
            RenderMode::Lines => self.edge_list(),
            RenderMode::Wireframe | RenderMode::Triangles => self.triangle_list(),
        }
    }
}

/// 由设置构建的场景：网格列表和公共的视图投影矩阵
#[derive(Debug, Clone)]
pub struct DemoScene {
    pub meshes: Vec<Mesh>,
    pub view_projection: Matrix4<f32>,
}

impl DemoScene {
    pub fn from_settings(settings: &RenderSettings) -> Result<Self, String> {
        let eye = parse_point3(&settings.camera_from)?;
        let target = parse_point3(&settings.camera_at)?;
        let up = parse_vec3(&settings.camera_up)?;
        let rotation = parse_vec3(&settings.object_rotation)?;

        let view = TransformFactory::view(&eye, &target, &up);
        let projection = TransformFactory::perspective(
            settings.aspect_ratio(),
            settings.camera_fov.to_radians(),
            settings.near,
            settings.far,
        );

        let cube_model = TransformFactory::rotation_euler(
            rotation.x.to_radians(),
            rotation.y.to_radians(),
            rotation.z.to_radians(),
        ) * TransformFactory::scaling(settings.object_scale);

        let mut meshes = vec![Mesh::cube().with_model(cube_model)];
        if settings.show_ground {
            let ground_model = TransformFactory::translation(&Vector3::new(0.0, -0.9, 0.0));
            meshes.push(Mesh::ground(4.0).with_model(ground_model));
        }

        Ok(Self {
            meshes,
            view_projection: projection * view,
        })
    }

    pub fn mvp(&self, mesh: &Mesh) -> Matrix4<f32> {
        self.view_projection * mesh.model
    }
}
