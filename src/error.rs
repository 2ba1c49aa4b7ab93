use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FsError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image truncated: needed {needed} bytes at offset {offset}")]
    Truncated { offset: usize, needed: usize },
    #[error("invalid superblock: {0}")]
    InvalidSuperBlock(&'static str),
    #[error("name is not valid utf-8")]
    InvalidName,
    #[error("permission must be exactly 9 mode characters")]
    InvalidPermission,
    #[error("file name cannot be empty")]
    EmptyName,
    #[error("file already exists: {0}")]
    AlreadyExists(String),
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("file of {size} bytes does not fit in one {max}-byte block")]
    FileTooLarge { size: usize, max: usize },
    #[error("no free inode left on the volume")]
    OutOfInodes,
}

pub type Result<T> = std::result::Result<T, FsError>;
