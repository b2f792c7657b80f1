use crate::core::frame_buffer::FrameBuffer;
use crate::geometry::color::{Color, ColorExt};
use image::ColorType;
use log::{info, warn};
use std::path::Path;

/// 保存图像数据到PNG文件
///
/// # 参数
/// * `path` - 输出文件路径
/// * `data` - 像素数据（u8数组）
/// * `width` - 图像宽度
/// * `height` - 图像高度
/// * `color_type` - `Rgb8` 或 `L8`
pub fn save_image(
    path: &Path,
    data: &[u8],
    width: u32,
    height: u32,
    color_type: ColorType,
) -> Result<(), String> {
    image::save_buffer(path, data, width, height, color_type)
        .map_err(|e| format!("保存图像到 {} 时出错: {}", path.display(), e))?;
    info!("图像已保存到 {}", path.display());
    Ok(())
}

/// 把打包的RGBA颜色缓冲转换成逐行的RGB字节
pub fn color_buffer_to_rgb(color_buffer: &FrameBuffer<u32>) -> Vec<u8> {
    color_buffer
        .as_slice()
        .iter()
        .flat_map(|&packed| Color::from_rgba32(packed).to_rgb8())
        .collect()
}

/// 把深度缓冲归一化为灰度图：最近的片元为白色，未写入的像素为黑色
///
/// `background` 是清屏时写入的深度值，这类像素不参与范围统计。
pub fn normalize_depth(depth_buffer: &[f32], background: f32) -> Vec<u8> {
    let (min_depth, max_depth) = depth_buffer
        .iter()
        .copied()
        .filter(|d| d.is_finite() && *d < background)
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), d| {
            (lo.min(d), hi.max(d))
        });

    if min_depth > max_depth {
        warn!("深度缓冲中没有任何片元，深度图为全黑");
        return vec![0; depth_buffer.len()];
    }

    let range = max_depth - min_depth;
    let inv_range = if range > 1e-6 { 1.0 / range } else { 0.0 };

    depth_buffer
        .iter()
        .map(|&depth| {
            if depth.is_finite() && depth < background {
                // 越近越亮，最远的片元也保留一点亮度以区别于背景
                let t = ((depth - min_depth) * inv_range).clamp(0.0, 1.0);
                (255.0 - t * 223.0).round() as u8
            } else {
                0
            }
        })
        .collect()
}

/// 保存渲染结果（彩色图像和可选的深度图）
///
/// 文件名为 `<output_name>_color.png` 和 `<output_name>_depth.png`。
pub fn save_render_result(
    color_buffer: &FrameBuffer<u32>,
    depth_buffer: Option<&FrameBuffer<f32>>,
    output_dir: &str,
    output_name: &str,
) -> Result<(), String> {
    std::fs::create_dir_all(output_dir)
        .map_err(|e| format!("创建输出目录 '{}' 失败: {}", output_dir, e))?;

    let width = color_buffer.width();
    let height = color_buffer.height();

    let color_path = Path::new(output_dir).join(format!("{}_color.png", output_name));
    save_image(
        &color_path,
        &color_buffer_to_rgb(color_buffer),
        width,
        height,
        ColorType::Rgb8,
    )?;

    if let Some(depth_buffer) = depth_buffer {
        let depth_path = Path::new(output_dir).join(format!("{}_depth.png", output_name));
        let grey = normalize_depth(depth_buffer.as_slice(), 1.0);
        save_image(
            &depth_path,
            &grey,
            depth_buffer.width(),
            depth_buffer.height(),
            ColorType::L8,
        )?;
    }

    Ok(())
}
