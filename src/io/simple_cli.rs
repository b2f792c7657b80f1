use crate::io::config_loader::TomlConfigLoader;
use crate::io::render_settings::{RenderMode, RenderSettings};
use clap::Parser;
use log::info;

/// 命令行参数：先读配置文件，再用显式给出的参数覆盖
#[derive(Parser, Debug, Default)]
#[command(name = "soft_rasterizer")]
#[command(about = "纯软件光栅化渲染器：渲染内置立方体到PNG")]
pub struct SimpleCli {
    /// 配置文件路径（TOML格式）
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// 把最终生效的配置写到该路径
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<String>,

    /// 图元类型
    #[arg(short, long, value_enum)]
    pub mode: Option<RenderMode>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    /// 输出文件的基础名称
    #[arg(short, long)]
    pub output: Option<String>,

    /// 输出图像的目录
    #[arg(long)]
    pub output_dir: Option<String>,

    /// 不保存深度图
    #[arg(long)]
    pub no_depth: bool,

    /// 关闭视景体裁剪
    #[arg(long)]
    pub no_clip: bool,

    /// 关闭背面剔除
    #[arg(long)]
    pub no_cull: bool,

    /// 不绘制地面
    #[arg(long)]
    pub no_ground: bool,

    /// 物体旋转（度），格式 "x,y,z"
    #[arg(long)]
    pub rotation: Option<String>,
}

impl SimpleCli {
    /// 解析命令行并返回最终的RenderSettings
    pub fn process() -> Result<RenderSettings, String> {
        Self::parse().into_settings()
    }

    pub fn into_settings(self) -> Result<RenderSettings, String> {
        let mut settings = if let Some(config_path) = &self.config {
            info!("加载配置文件: {}", config_path);
            TomlConfigLoader::load_from_file(config_path)
                .map_err(|e| format!("配置文件加载失败: {}", e))?
        } else {
            info!("使用默认设置");
            RenderSettings::default()
        };

        self.apply_to(&mut settings);
        settings.validate()?;

        if let Some(path) = &self.save_config {
            TomlConfigLoader::save_to_file(&settings, path)?;
            info!("配置已保存到 {}", path);
        }

        Ok(settings)
    }

    fn apply_to(&self, settings: &mut RenderSettings) {
        if let Some(mode) = self.mode {
            settings.mode = mode;
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(output) = &self.output {
            settings.output = output.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            settings.output_dir = output_dir.clone();
        }
        if let Some(rotation) = &self.rotation {
            settings.object_rotation = rotation.clone();
        }
        if self.no_depth {
            settings.save_depth = false;
        }
        if self.no_clip {
            settings.clip_to_frustum = false;
        }
        if self.no_cull {
            settings.backface_culling = false;
        }
        if self.no_ground {
            settings.show_ground = false;
        }
    }
}
