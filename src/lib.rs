//! # soft_rasterizer
//!
//! 纯软件3D渲染管线：顶点变换、图元装配、齐次空间裁剪、透视除法、视口变换、
//! 背面剔除、增量式扫描转换以及深度测试写回，全部在内存帧缓冲中完成。

pub mod core;
pub mod demos;
pub mod geometry;
pub mod io;
pub mod utils;

pub use crate::core::frame_buffer::FrameBuffer;
pub use crate::core::line_processor::LineProcessor;
pub use crate::core::point_processor::PointProcessor;
pub use crate::core::renderer::{
    LineRenderer, MeshRenderer, PointRenderer, RenderStats, Renderer, TriangleRenderer,
};
pub use crate::core::triangle_processor::TriangleProcessor;
pub use crate::geometry::{Color, ColorExt, Fragment, Vertex};
