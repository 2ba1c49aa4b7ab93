use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::*;
use crate::error::{FsError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuperBlock {
    pub total_blocks: u32, // Total number of blocks in the volume
    pub block_size: u32,   // Fixed to BLOCK_SIZE
}

impl SuperBlock {
    pub fn new(total_blocks: u32) -> Self {
        SuperBlock {
            total_blocks,
            block_size: BLOCK_SIZE as u32,
        }
    }
}

/// Nine mode-string bytes in `rwxr-xr-x` shape.
/// Stored verbatim on disk and in every directory entry; never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permission([u8; PERMISSION_LEN]);

impl Permission {
    pub const ROOT: Self = Permission(*ROOT_PERMISSION);
    pub const FILE_DEFAULT: Self = Permission(*DEFAULT_FILE_PERMISSION);

    pub fn from_bytes(raw: [u8; PERMISSION_LEN]) -> Self {
        Permission(raw)
    }

    pub fn as_bytes(&self) -> &[u8; PERMISSION_LEN] {
        &self.0
    }
}

impl TryFrom<&str> for Permission {
    type Error = FsError;

    fn try_from(s: &str) -> Result<Self> {
        let raw: [u8; PERMISSION_LEN] = s
            .as_bytes()
            .try_into()
            .map_err(|_| FsError::InvalidPermission)?;
        Ok(Permission(raw))
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(std::str::from_utf8(&self.0).unwrap_or("?????????"))
    }
}

/// Per-file metadata plus the whole single-block payload.
/// Identified by its position in the slot table; that position doubles as the
/// block index in the free list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inode {
    pub data: Vec<u8>, // At most BLOCK_SIZE bytes
    pub used: bool,
    pub permission: Permission,
    pub created_at: i64, // Unix seconds
    pub updated_at: i64,
}

impl Inode {
    /// Placeholder for a slot that is not (or no longer) occupied.
    pub fn vacant() -> Self {
        Inode {
            data: Vec::new(),
            used: false,
            permission: Permission::from_bytes([0; PERMISSION_LEN]),
            created_at: 0,
            updated_at: 0,
        }
    }

    pub fn occupied(data: Vec<u8>, permission: Permission) -> Self {
        let now = unix_now();
        Inode {
            data,
            used: true,
            permission,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String, // Non-empty, unique across the whole directory
    pub inode: u32,   // Slot index the payload lives at
    pub permission: Permission,
}

pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
