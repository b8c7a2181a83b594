mod access_probe;
mod app;
mod check;
mod credential_probe;
mod demo;
mod dispatcher;
mod infra;
mod region_probe;
mod setup;
mod smoke;

#[cfg(test)]
mod test_utils;

pub use access_probe::*;
pub use app::*;
pub use check::*;
pub use credential_probe::*;
pub use demo::*;
pub use dispatcher::*;
pub use infra::*;
pub use region_probe::*;
pub use setup::*;
pub use smoke::*;
