pub mod color;
pub mod report;
pub mod title;

pub use color::{ColorConfig, ColorMode, init_color_config};
pub use report::*;
pub use title::{Category, TitleFormat};
