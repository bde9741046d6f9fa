pub mod render;
pub mod span;
pub mod style;

pub use render::{RenderFrame, render};
