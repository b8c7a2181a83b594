mod classification;
mod completion;
mod error;
mod infra;
mod message;
mod model;
mod probe;
mod sanitizer;
mod utils;

pub use classification::*;
pub use completion::*;
pub use error::*;
pub use infra::*;
pub use message::*;
pub use model::*;
pub use probe::*;
pub use sanitizer::*;
pub use utils::*;
