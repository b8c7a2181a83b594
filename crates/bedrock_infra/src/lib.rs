mod bedrock_infra;
mod catalog;
mod command;
mod converse;
mod credentials;
mod error;
mod fs_write;
mod sdk_config;

pub use bedrock_infra::*;
pub use catalog::*;
pub use command::*;
pub use converse::*;
pub use credentials::*;
pub use fs_write::*;
pub use sdk_config::*;
