pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use crate::config::AppConfig;
pub use crate::core::connect::{Connection, ResourceKind};
pub use crate::core::files::FileStore;
pub use crate::core::records::RecordStore;
pub use crate::domain::model::{DeleteResult, Expiry, FileListing, FileSource, Record};
pub use crate::utils::error::{KvDriveError, Result};
