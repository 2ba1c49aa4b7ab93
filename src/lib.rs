//! Flatfs simulates a single-volume file system inside one flat host file.
//! The whole volume lives in memory and is rewritten to the backing image in
//! full on every save; there is no incremental persistence and no support for
//! concurrent access.
//!
//! Flatfs's linear image layout (little-endian, no magic, no version tag):
//! - Superblock
//! - Free list (one byte per block)
//! - Directory (flat namespace, root entry first)
//! - Inode table (payload + metadata per slot)
//! - Current directory string
//!
//! Flatfs's layers (from bottom to top):
//! 1. Codec: bounds-checked cursor over the raw image bytes.   | Fs implemented
//! 2. Slot table: free-list allocator + sparse inode table.    | Fs implemented
//! 3. Directory: ordered name-to-inode bindings.               | Fs implemented
//! 4. FileSystem: the aggregate users load, mutate and save.   | Fs implemented
//! 5. Driver: existence check, load/op/save loop.              | User implemented

mod config;
mod codec;
mod structs;
mod alloc;
mod directory;
mod fs;
mod error;

pub use config::*;
pub use structs::*;
pub use alloc::SlotTable;
pub use directory::find_entry;
pub use fs::*;
pub use error::FsError as Error;
pub use error::Result;
