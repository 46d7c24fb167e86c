// Adapters over the wire clients: configuration resolution, connection
// handling, and the public store operations.

pub mod connect;
pub mod files;
pub mod records;

pub use connect::{Connection, ResourceKind};
pub use files::FileStore;
pub use records::RecordStore;
