//! The flat namespace: one ordered list of name-to-inode bindings.
//! Order reflects creation order, with the root entry `"/"` always first.
//! Matching is an exact, case-sensitive linear scan.

use crate::structs::DirEntry;

/// Position of the entry bound to `name`, if any.
pub fn find_entry(directory: &[DirEntry], name: &str) -> Option<usize> {
    directory.iter().position(|entry| entry.name == name)
}

/// Removes the entry bound to `name`, preserving the order of the rest.
pub(crate) fn remove_entry(directory: &mut Vec<DirEntry>, name: &str) -> Option<DirEntry> {
    find_entry(directory, name).map(|pos| directory.remove(pos))
}
