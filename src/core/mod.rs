pub mod clipping;
pub mod frame_buffer;
pub mod line_processor;
pub mod point_processor;
pub mod rasterizer;
pub mod renderer;
pub mod triangle_processor;
