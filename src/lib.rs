pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod opener;
pub mod path;
pub mod tasks;
pub mod ui;

pub use error::{GitFsError, Result};
pub use fs::GitFs;
pub use opener::open_fs;
