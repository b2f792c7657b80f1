//! # 扫描转换模块
//!
//! 增量式整数算法：线段（Bresenham）、多边形边与三角形扫描线填充

pub mod edge_rasterizer;
pub mod line_rasterizer;
pub mod triangle_rasterizer;

// 重新导出主要类型和函数
pub use edge_rasterizer::EdgeRasterizer;
pub use line_rasterizer::LineRasterizer;
pub use triangle_rasterizer::{TriangleRasterizer, signed_area};
