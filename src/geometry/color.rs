use nalgebra::Vector4;

/// RGBA颜色，分量依次存放在 x, y, z, w 中
///
/// 内部不做范围限制，插值过程中允许越界，只有打包为32位整数时才截断到 [0, 1]。
pub type Color = Vector4<f32>;

/// 颜色预设与打包转换
pub trait ColorExt {
    fn white() -> Self;
    fn red() -> Self;
    fn green() -> Self;
    fn blue() -> Self;
    fn grey() -> Self;
    fn black() -> Self;

    /// 打包为 RGBA8888，内存布局为 r | g<<8 | b<<16 | a<<24
    fn to_rgba32(&self) -> u32;

    /// `to_rgba32` 的逆操作
    fn from_rgba32(packed: u32) -> Self;

    /// 转换为 [r, g, b] 字节，用于保存图像
    fn to_rgb8(&self) -> [u8; 3];
}

impl ColorExt for Color {
    fn white() -> Self {
        Color::new(1.0, 1.0, 1.0, 1.0)
    }

    fn red() -> Self {
        Color::new(1.0, 0.0, 0.0, 1.0)
    }

    fn green() -> Self {
        Color::new(0.0, 1.0, 0.0, 1.0)
    }

    fn blue() -> Self {
        Color::new(0.0, 0.0, 1.0, 1.0)
    }

    fn grey() -> Self {
        Color::new(0.5, 0.5, 0.5, 1.0)
    }

    fn black() -> Self {
        Color::new(0.0, 0.0, 0.0, 1.0)
    }

    fn to_rgba32(&self) -> u32 {
        channel_to_u8(self.x)
            | (channel_to_u8(self.y) << 8)
            | (channel_to_u8(self.z) << 16)
            | (channel_to_u8(self.w) << 24)
    }

    fn from_rgba32(packed: u32) -> Self {
        let unpack = |shift: u32| ((packed >> shift) & 0xFF) as f32 / 255.0;
        Color::new(unpack(0), unpack(8), unpack(16), unpack(24))
    }

    fn to_rgb8(&self) -> [u8; 3] {
        [
            channel_to_u8(self.x) as u8,
            channel_to_u8(self.y) as u8,
            channel_to_u8(self.z) as u8,
        ]
    }
}

#[inline]
fn channel_to_u8(value: f32) -> u32 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_channels_in_rgba_order() {
        assert_eq!(Color::red().to_rgba32(), 0xFF00_00FF);
        assert_eq!(Color::green().to_rgba32(), 0xFF00_FF00);
        assert_eq!(Color::blue().to_rgba32(), 0xFFFF_0000);
        assert_eq!(Color::white().to_rgba32(), 0xFFFF_FFFF);
    }

    #[test]
    fn clamps_only_when_packing() {
        let bright = Color::new(2.0, -1.0, 0.5, 1.0);
        // 未打包前保持原值
        assert_eq!(bright.x, 2.0);
        assert_eq!(bright.y, -1.0);

        let unpacked = Color::from_rgba32(bright.to_rgba32());
        assert_eq!(unpacked.x, 1.0);
        assert_eq!(unpacked.y, 0.0);
        assert!((unpacked.z - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn grey_round_trips_through_rgb8() {
        assert_eq!(Color::grey().to_rgb8(), [128, 128, 128]);
    }
}
