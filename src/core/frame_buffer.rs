use rayon::prelude::*;
use std::ops::{Index, IndexMut};

/// 固定尺寸的二维缓冲区，按行主序存储
///
/// 颜色缓冲使用 `FrameBuffer<u32>`（打包的RGBA），深度缓冲使用 `FrameBuffer<f32>`。
/// 尺寸在构造时确定，渲染期间不会改变。
#[derive(Debug, Clone)]
pub struct FrameBuffer<T> {
    width: u32,
    height: u32,
    buffer: Vec<T>,
}

impl<T: Copy + Default + Send + Sync> FrameBuffer<T> {
    /// 宽高都必须大于0，否则 panic
    pub fn new(width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "FrameBuffer::new(): invalid size {}x{}",
            width,
            height
        );
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            buffer: vec![T::default(); size],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// 将 (u, v) 截断到缓冲区范围内后返回一维索引，永远不会越界
    #[inline]
    pub fn index_at(&self, u: i32, v: i32) -> usize {
        let u = u.clamp(0, self.width as i32 - 1) as usize;
        let v = v.clamp(0, self.height as i32 - 1) as usize;
        v * self.width as usize + u
    }

    /// 归一化坐标 [0, 1] 版本的 `index_at`
    #[inline]
    pub fn index_at_norm(&self, u_norm: f32, v_norm: f32) -> usize {
        let u = (u_norm * self.width as f32) as i32;
        let v = (v_norm * self.height as f32) as i32;
        self.index_at(u, v)
    }

    /// 将整个缓冲区设为给定值
    pub fn clear_buffer(&mut self, value: T) {
        self.buffer.par_iter_mut().for_each(|element| *element = value);
    }

    /// 将整个缓冲区设为默认值（数值类型即为0）
    pub fn clear_to_default(&mut self) {
        self.clear_buffer(T::default());
    }

    pub fn as_slice(&self) -> &[T] {
        &self.buffer
    }
}

impl<T> Index<usize> for FrameBuffer<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.buffer[index]
    }
}

impl<T> IndexMut<usize> for FrameBuffer<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.buffer[index]
    }
}
