//! The filesystem aggregate: fresh creation, whole-image load/save, and the
//! file-level operations built on the slot table and the directory.

use std::fmt;
use std::path::Path;

use log::{debug, warn};

use crate::alloc::SlotTable;
use crate::codec::{ByteReader, ByteWriter};
use crate::config::*;
use crate::directory;
use crate::error::{FsError, Result};
use crate::structs::{DirEntry, Inode, Permission, SuperBlock};

/// The single mutable unit the engine operates on. Exclusively owned by the
/// driver for the duration of a run; every operation takes `&mut self` and
/// either completes fully or leaves the aggregate untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystem {
    superblock: SuperBlock,
    slots: SlotTable,
    directory: Vec<DirEntry>,
    current_dir: String,
}

impl FileSystem {
    /// Builds a fresh volume and persists it to `image` immediately.
    /// The root gets one zero-filled block of payload and the first directory
    /// entry, so a new volume always has exactly one occupied slot.
    pub fn create(image: impl AsRef<Path>) -> Result<Self> {
        let mut fs = FileSystem {
            superblock: SuperBlock::new(TOTAL_BLOCKS as u32),
            slots: SlotTable::with_capacity(TOTAL_BLOCKS),
            directory: Vec::new(),
            current_dir: ROOT_NAME.to_string(),
        };

        let root = fs.slots.allocate(vec![0u8; BLOCK_SIZE], Permission::ROOT)?;
        fs.directory.push(DirEntry {
            name: ROOT_NAME.to_string(),
            inode: root,
            permission: Permission::ROOT,
        });

        fs.save(image)?;
        Ok(fs)
    }

    /// Rehydrates the aggregate from the backing image.
    pub fn load(image: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(image.as_ref())?;
        let fs = Self::from_bytes(&bytes)?;
        debug!(
            "loaded {} bytes from {}",
            bytes.len(),
            image.as_ref().display()
        );
        Ok(fs)
    }

    /// Rewrites the backing image from scratch. All-or-nothing per call:
    /// there is no partial or incremental persistence.
    pub fn save(&self, image: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes();
        std::fs::write(image.as_ref(), &bytes)?;
        debug!(
            "saved {} bytes to {}",
            bytes.len(),
            image.as_ref().display()
        );
        Ok(())
    }

    /// Serializes every section in image order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut w = ByteWriter::new();
        self.superblock.encode(&mut w);
        for &free in self.slots.free_list() {
            w.put_bool(free);
        }
        w.put_u32(self.directory.len() as u32);
        for entry in &self.directory {
            entry.encode(&mut w);
        }
        w.put_u32(self.slots.inodes().len() as u32);
        for inode in self.slots.inodes() {
            inode.encode(&mut w);
        }
        w.put_string(&self.current_dir);
        w.into_bytes()
    }

    /// Decodes a full image, the exact inverse of [`to_bytes`].
    ///
    /// [`to_bytes`]: FileSystem::to_bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut r = ByteReader::new(bytes);

        let superblock = SuperBlock::decode(&mut r)?;
        if superblock.total_blocks == 0 {
            return Err(FsError::InvalidSuperBlock("zero total blocks"));
        }
        if superblock.block_size != BLOCK_SIZE as u32 {
            return Err(FsError::InvalidSuperBlock("unexpected block size"));
        }

        let mut free = Vec::with_capacity(superblock.total_blocks as usize);
        for _ in 0..superblock.total_blocks {
            free.push(r.get_bool()?);
        }

        let entry_count = r.get_u32()?;
        let mut dir = Vec::new();
        for _ in 0..entry_count {
            dir.push(DirEntry::decode(&mut r)?);
        }

        let inode_count = r.get_u32()?;
        let mut inodes = Vec::new();
        for _ in 0..inode_count {
            inodes.push(Inode::decode(&mut r)?);
        }

        let current_dir = r.get_string()?;

        Ok(FileSystem {
            superblock,
            slots: SlotTable::from_parts(free, inodes),
            directory: dir,
            current_dir,
        })
    }

    /// Creates a file whose whole payload fits in one block.
    /// Returns the slot index the payload landed at. Every rejection leaves
    /// the aggregate unchanged; in particular the directory is only touched
    /// after allocation has succeeded.
    pub fn create_file(&mut self, name: &str, data: &[u8]) -> Result<u32> {
        if name.is_empty() {
            warn!("file name cannot be empty");
            return Err(FsError::EmptyName);
        }
        if directory::find_entry(&self.directory, name).is_some() {
            warn!("file already exists with name {name}");
            return Err(FsError::AlreadyExists(name.to_string()));
        }
        if data.len() > BLOCK_SIZE {
            warn!("file of {} bytes does not fit in one block", data.len());
            return Err(FsError::FileTooLarge {
                size: data.len(),
                max: BLOCK_SIZE,
            });
        }

        let inode = self.slots.allocate(data.to_vec(), Permission::FILE_DEFAULT)?;
        self.directory.push(DirEntry {
            name: name.to_string(),
            inode,
            permission: Permission::FILE_DEFAULT,
        });

        Ok(inode)
    }

    /// Unbinds `name` and vacates its slot. The slot table is never
    /// renumbered, so surviving entries keep referencing the right inodes.
    pub fn delete_file(&mut self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(FsError::EmptyName);
        }
        let Some(entry) = directory::remove_entry(&mut self.directory, name) else {
            return Err(FsError::NotFound(name.to_string()));
        };
        self.slots.release(entry.inode);
        Ok(())
    }

    /// Read-only snapshot of the volume: superblock summary, current
    /// directory and every directory entry in storage order.
    pub fn list_files(&self) -> Listing {
        Listing {
            superblock: self.superblock,
            current_dir: self.current_dir.clone(),
            entries: self.directory.clone(),
        }
    }

    pub fn superblock(&self) -> &SuperBlock {
        &self.superblock
    }

    pub fn slots(&self) -> &SlotTable {
        &self.slots
    }

    pub fn inode(&self, index: u32) -> Option<&Inode> {
        self.slots.get(index)
    }

    pub fn directory(&self) -> &[DirEntry] {
        &self.directory
    }

    pub fn current_dir(&self) -> &str {
        &self.current_dir
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub superblock: SuperBlock,
    pub current_dir: String,
    pub entries: Vec<DirEntry>,
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ":::::::::::MetaData::::::::::")?;
        writeln!(
            f,
            "BlockSize: {}, TotalBlocks: {}",
            self.superblock.block_size, self.superblock.total_blocks
        )?;
        writeln!(f, "Current Directory: {}", self.current_dir)?;
        writeln!(f)?;
        writeln!(f, ":::::::::::ENTRIES::::::::::")?;
        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(
                f,
                "{}) {} -> inode {} [{}]",
                i + 1,
                entry.name,
                entry.inode,
                entry.permission
            )?;
        }
        Ok(())
    }
}
