// geometry/mod.rs
// 导出数据模型和变换相关模块
pub mod color;
pub mod primitives;
pub mod transform;
pub mod vertex;

pub use color::{Color, ColorExt};
pub use primitives::{Fragment, Line, Point, Triangle};
pub use vertex::Vertex;
