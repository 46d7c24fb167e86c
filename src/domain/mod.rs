// Domain layer: data model shared by the wire clients and the adapters.

pub mod model;

pub use model::{DeleteResult, Expiry, FileListing, FileSource, Record};
