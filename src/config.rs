pub const BLOCK_SIZE: usize = 4096;
pub const TOTAL_BLOCKS: usize = 1000; // Volume size is fixed at creation time
pub const IMAGE_PATH: &str = "filesystem.bin"; // Default backing image

pub const PERMISSION_LEN: usize = 9; // Mode string, e.g. "rwxr-xr-x"
pub const ROOT_PERMISSION: &[u8; PERMISSION_LEN] = b"rwxr-xr-x";
pub const DEFAULT_FILE_PERMISSION: &[u8; PERMISSION_LEN] = b"rw-r--r--";

pub const ROOT_NAME: &str = "/";
