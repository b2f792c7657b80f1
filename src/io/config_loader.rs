use crate::io::render_settings::{RenderMode, RenderSettings};
use log::warn;
use serde::Serialize;
use std::path::Path;
use toml::Value;

/// TOML配置管理器 - 统一处理配置的读写
pub struct TomlConfigLoader;

impl TomlConfigLoader {
    /// 从TOML文件加载完整配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<RenderSettings, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("读取配置文件失败: {}", e))?;

        Self::load_from_content(&content)
    }

    /// 从TOML内容字符串加载配置
    pub fn load_from_content(content: &str) -> Result<RenderSettings, String> {
        let toml_value: Value =
            toml::from_str(content).map_err(|e| format!("解析TOML失败: {}", e))?;

        Self::parse_toml_to_settings(toml_value)
    }

    /// 保存配置到TOML文件
    pub fn save_to_file<P: AsRef<Path>>(settings: &RenderSettings, path: P) -> Result<(), String> {
        let toml_content = Self::settings_to_toml(settings)?;
        std::fs::write(path, toml_content).map_err(|e| format!("写入配置文件失败: {}", e))
    }

    // ===== TOML -> RenderSettings 转换 =====

    fn parse_toml_to_settings(toml: Value) -> Result<RenderSettings, String> {
        let mut settings = RenderSettings::default();

        // [files] 部分
        if let Some(files) = toml.get("files").and_then(|v| v.as_table()) {
            Self::parse_files_section(&mut settings, files)?;
        }

        // [render] 部分
        if let Some(render) = toml.get("render").and_then(|v| v.as_table()) {
            Self::parse_render_section(&mut settings, render)?;
        }

        // [camera] 部分
        if let Some(camera) = toml.get("camera").and_then(|v| v.as_table()) {
            Self::parse_camera_section(&mut settings, camera)?;
        }

        // [object] 部分
        if let Some(object) = toml.get("object").and_then(|v| v.as_table()) {
            Self::parse_object_section(&mut settings, object)?;
        }

        settings.validate()?;
        Ok(settings)
    }

    fn parse_files_section(
        settings: &mut RenderSettings,
        files: &toml::Table,
    ) -> Result<(), String> {
        if let Some(output) = files.get("output").and_then(|v| v.as_str()) {
            settings.output = output.to_string();
        }
        if let Some(output_dir) = files.get("output_dir").and_then(|v| v.as_str()) {
            settings.output_dir = output_dir.to_string();
        }
        if let Some(save_depth) = files.get("save_depth").and_then(|v| v.as_bool()) {
            settings.save_depth = save_depth;
        }
        Ok(())
    }

    fn parse_render_section(
        settings: &mut RenderSettings,
        render: &toml::Table,
    ) -> Result<(), String> {
        if let Some(width) = render.get("width").and_then(|v| v.as_integer()) {
            settings.width = Self::to_dimension("width", width)?;
        }
        if let Some(height) = render.get("height").and_then(|v| v.as_integer()) {
            settings.height = Self::to_dimension("height", height)?;
        }
        if let Some(mode) = render.get("mode").and_then(|v| v.as_str()) {
            match RenderMode::parse(mode) {
                Some(mode) => settings.mode = mode,
                None => warn!("未知的渲染模式 '{}', 使用默认值 {}", mode, settings.mode.as_str()),
            }
        }
        if let Some(clip) = render.get("clip_to_frustum").and_then(|v| v.as_bool()) {
            settings.clip_to_frustum = clip;
        }
        if let Some(backface_culling) = render.get("backface_culling").and_then(|v| v.as_bool()) {
            settings.backface_culling = backface_culling;
        }
        if let Some(clear_color) = render.get("clear_color").and_then(|v| v.as_str()) {
            settings.clear_color = clear_color.to_string();
        }
        if let Some(show_ground) = render.get("show_ground").and_then(|v| v.as_bool()) {
            settings.show_ground = show_ground;
        }
        Ok(())
    }

    fn parse_camera_section(
        settings: &mut RenderSettings,
        camera: &toml::Table,
    ) -> Result<(), String> {
        if let Some(from) = camera.get("from").and_then(|v| v.as_str()) {
            settings.camera_from = from.to_string();
        }
        if let Some(at) = camera.get("at").and_then(|v| v.as_str()) {
            settings.camera_at = at.to_string();
        }
        if let Some(up) = camera.get("up").and_then(|v| v.as_str()) {
            settings.camera_up = up.to_string();
        }
        if let Some(fov) = Self::get_float(camera, "fov") {
            settings.camera_fov = fov;
        }
        if let Some(near) = Self::get_float(camera, "near") {
            settings.near = near;
        }
        if let Some(far) = Self::get_float(camera, "far") {
            settings.far = far;
        }
        Ok(())
    }

    fn parse_object_section(
        settings: &mut RenderSettings,
        object: &toml::Table,
    ) -> Result<(), String> {
        if let Some(rotation) = object.get("rotation").and_then(|v| v.as_str()) {
            settings.object_rotation = rotation.to_string();
        }
        if let Some(scale) = Self::get_float(object, "scale") {
            settings.object_scale = scale;
        }
        Ok(())
    }

    /// 浮点字段也接受整数写法（`fov = 50`）
    fn get_float(table: &toml::Table, key: &str) -> Option<f32> {
        match table.get(key)? {
            Value::Float(f) => Some(*f as f32),
            Value::Integer(i) => Some(*i as f32),
            other => {
                warn!("字段 '{}' 需要数字, 实际为 {}", key, other.type_str());
                None
            }
        }
    }

    fn to_dimension(key: &str, value: i64) -> Result<u32, String> {
        u32::try_from(value)
            .ok()
            .filter(|&v| v > 0)
            .ok_or_else(|| format!("无效的{}: {}", key, value))
    }

    // ===== RenderSettings -> TOML 转换 =====

    fn settings_to_toml(settings: &RenderSettings) -> Result<String, String> {
        let document = ConfigDocument::from(settings);
        let body = toml::to_string_pretty(&document)
            .map_err(|e| format!("序列化配置失败: {}", e))?;

        let mut content = String::new();
        content.push_str("# 软件光栅化渲染器配置文件\n");
        content.push_str("# mode 可选: points, lines, wireframe, triangles\n\n");
        content.push_str(&body);
        Ok(content)
    }
}

#[derive(Serialize)]
struct ConfigDocument<'a> {
    files: FilesSection<'a>,
    render: RenderSection<'a>,
    camera: CameraSection<'a>,
    object: ObjectSection<'a>,
}

#[derive(Serialize)]
struct FilesSection<'a> {
    output: &'a str,
    output_dir: &'a str,
    save_depth: bool,
}

#[derive(Serialize)]
struct RenderSection<'a> {
    width: u32,
    height: u32,
    mode: RenderMode,
    clip_to_frustum: bool,
    backface_culling: bool,
    clear_color: &'a str,
    show_ground: bool,
}

#[derive(Serialize)]
struct CameraSection<'a> {
    from: &'a str,
    at: &'a str,
    up: &'a str,
    fov: f32,
    near: f32,
    far: f32,
}

#[derive(Serialize)]
struct ObjectSection<'a> {
    rotation: &'a str,
    scale: f32,
}

impl<'a> From<&'a RenderSettings> for ConfigDocument<'a> {
    fn from(s: &'a RenderSettings) -> Self {
        Self {
            files: FilesSection {
                output: &s.output,
                output_dir: &s.output_dir,
                save_depth: s.save_depth,
            },
            render: RenderSection {
                width: s.width,
                height: s.height,
                mode: s.mode,
                clip_to_frustum: s.clip_to_frustum,
                backface_culling: s.backface_culling,
                clear_color: &s.clear_color,
                show_ground: s.show_ground,
            },
            camera: CameraSection {
                from: &s.camera_from,
                at: &s.camera_at,
                up: &s.camera_up,
                fov: s.camera_fov,
                near: s.near,
                far: s.far,
            },
            object: ObjectSection {
                rotation: &s.object_rotation,
                scale: s.object_scale,
            },
        }
    }
}
