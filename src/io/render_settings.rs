use crate::geometry::color::Color;
use nalgebra::{Point3, Vector3};
use serde::Serialize;

/// 选择使用哪一种图元渲染器
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// 每个顶点一个点
    Points,
    /// 每两个顶点一条线段
    Lines,
    /// 每三个顶点展开为三角形的三条边
    Wireframe,
    #[default]
    Triangles,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Points => "points",
            RenderMode::Lines => "lines",
            RenderMode::Wireframe => "wireframe",
            RenderMode::Triangles => "triangles",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "points" => Some(RenderMode::Points),
            "lines" => Some(RenderMode::Lines),
            "wireframe" => Some(RenderMode::Wireframe),
            "triangles" => Some(RenderMode::Triangles),
            _ => None,
        }
    }
}

/// 所有可通过TOML或命令行配置的渲染参数
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    // ===== 文件路径设置 =====
    /// 输出文件的基础名称（"render" -> "render_color.png", "render_depth.png"）
    pub output: String,
    /// 输出图像的目录
    pub output_dir: String,
    /// 同时保存深度图
    pub save_depth: bool,

    // ===== 渲染基础设置 =====
    pub width: u32,
    pub height: u32,
    pub mode: RenderMode,
    /// 启用视景体裁剪
    pub clip_to_frustum: bool,
    /// 启用背面剔除（仅三角形）
    pub backface_culling: bool,
    /// 清屏颜色，格式为"r,g,b"
    pub clear_color: String,
    /// 是否绘制地面
    pub show_ground: bool,

    // ===== 相机参数 =====
    /// 相机位置，格式为"x,y,z"
    pub camera_from: String,
    /// 相机目标，格式为"x,y,z"
    pub camera_at: String,
    /// 相机上方向，格式为"x,y,z"
    pub camera_up: String,
    /// 垂直视场角（度）
    pub camera_fov: f32,
    pub near: f32,
    pub far: f32,

    // ===== 物体变换 =====
    /// 欧拉角（度），格式为"x,y,z"
    pub object_rotation: String,
    pub object_scale: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            output: "output".to_string(),
            output_dir: "output_rust".to_string(),
            save_depth: true,
            width: 512,
            height: 512,
            mode: RenderMode::Triangles,
            clip_to_frustum: true,
            backface_culling: true,
            clear_color: "0.5,0.5,0.5".to_string(),
            show_ground: true,
            camera_from: "0,0,2.5".to_string(),
            camera_at: "0,0,0".to_string(),
            camera_up: "0,1,0".to_string(),
            camera_fov: 50.0,
            near: 0.5,
            far: 5.0,
            object_rotation: "25,35,0".to_string(),
            object_scale: 0.6,
        }
    }
}

impl RenderSettings {
    /// 检查参数是否合法
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "图像尺寸必须大于0: {}x{}",
                self.width, self.height
            ));
        }
        if self.near <= 0.0 || self.far <= self.near {
            return Err(format!(
                "无效的裁剪平面: near={}, far={}",
                self.near, self.far
            ));
        }
        if !(self.camera_fov > 0.0 && self.camera_fov < 180.0) {
            return Err(format!("无效的视场角: {}", self.camera_fov));
        }
        parse_point3(&self.camera_from).map_err(|e| format!("无效的相机位置: {}", e))?;
        parse_point3(&self.camera_at).map_err(|e| format!("无效的相机目标: {}", e))?;
        parse_vec3(&self.camera_up).map_err(|e| format!("无效的相机上方向: {}", e))?;
        parse_vec3(&self.object_rotation).map_err(|e| format!("无效的物体旋转: {}", e))?;
        self.clear_color_value()?;
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn clear_color_value(&self) -> Result<Color, String> {
        let rgb = parse_vec3(&self.clear_color).map_err(|e| format!("无效的清屏颜色: {}", e))?;
        Ok(Color::new(rgb.x, rgb.y, rgb.z, 1.0))
    }
}

pub fn parse_vec3(s: &str) -> Result<Vector3<f32>, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err("需要3个逗号分隔的值".to_string());
    }
    let mut values = [0.0f32; 3];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .trim()
            .parse::<f32>()
            .map_err(|e| format!("无效数字 '{}': {}", part, e))?;
    }
    Ok(Vector3::new(values[0], values[1], values[2]))
}

pub fn parse_point3(s: &str) -> Result<Point3<f32>, String> {
    parse_vec3(s).map(Point3::from)
}
