mod aws_env;
mod dotenv;
mod settings;

pub use aws_env::*;
pub use dotenv::*;
pub use settings::*;
