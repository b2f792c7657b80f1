pub mod scenes;

pub use scenes::{DemoScene, Mesh};
