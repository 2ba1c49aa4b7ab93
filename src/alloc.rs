//! First-fit slot allocation.
//! The free list and the inode table are parallel arrays on disk: index `i`
//! of the free list tells whether slot `i` of the inode table is vacant. The
//! `SlotTable` owns both together so their positional alignment cannot drift;
//! nothing outside this module ever flips a free bit or grows the table.

use log::warn;

use crate::error::{FsError, Result};
use crate::structs::{Inode, Permission};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTable {
    free: Vec<bool>, // true = block i is unallocated
    inodes: Vec<Inode>,
}

impl SlotTable {
    /// An all-free table with `total` block slots and no inodes yet.
    /// The inode table is sparse and only grows when an allocation lands
    /// past its current end.
    pub fn with_capacity(total: usize) -> Self {
        SlotTable {
            free: vec![true; total],
            inodes: Vec::new(),
        }
    }

    pub(crate) fn from_parts(free: Vec<bool>, inodes: Vec<Inode>) -> Self {
        SlotTable { free, inodes }
    }

    /// Claims the lowest free slot and fills it with a fully-populated inode
    /// (used, both timestamps set to now). On exhaustion nothing is mutated.
    pub fn allocate(&mut self, data: Vec<u8>, permission: Permission) -> Result<u32> {
        let Some(index) = self.free.iter().position(|&b| b) else {
            warn!("no free inode left on the volume");
            return Err(FsError::OutOfInodes);
        };

        if self.inodes.len() < index + 1 {
            self.inodes.resize_with(index + 1, Inode::vacant);
        }
        self.free[index] = false;
        self.inodes[index] = Inode::occupied(data, permission);

        Ok(index as u32)
    }

    /// Vacates a slot: the inode is reset to the placeholder and exactly the
    /// matching free bit is cleared. Slots are never spliced out, so the
    /// positions of every other inode stay stable.
    pub fn release(&mut self, index: u32) {
        let index = index as usize;
        debug_assert!(index < self.free.len(), "release past end of free list");
        if let Some(slot) = self.inodes.get_mut(index) {
            *slot = Inode::vacant();
        }
        if let Some(bit) = self.free.get_mut(index) {
            *bit = true;
        }
    }

    pub fn get(&self, index: u32) -> Option<&Inode> {
        self.inodes.get(index as usize)
    }

    pub fn free_list(&self) -> &[bool] {
        &self.free
    }

    pub fn inodes(&self) -> &[Inode] {
        &self.inodes
    }

    pub fn capacity(&self) -> usize {
        self.free.len()
    }

    /// Number of occupied slots, i.e. `false` entries in the free list.
    pub fn occupied_count(&self) -> usize {
        self.free.iter().filter(|&&b| !b).count()
    }
}
