//! Little-endian wire codec for the backing image.
//! Every decode goes through a cursor that knows the buffer length and fails
//! with an explicit `Truncated` error when a length prefix points past the
//! end of the image. Encoding is the exact inverse, with no padding between
//! fields and no checksum or version tag anywhere in the format.

use crate::config::*;
use crate::error::{FsError, Result};
use crate::structs::{DirEntry, Inode, Permission, SuperBlock};

pub(crate) struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        ByteReader { buf, pos: 0 }
    }

    /// Consumes the next `len` raw bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.buf.len() - self.pos < len {
            return Err(FsError::Truncated {
                offset: self.pos,
                needed: len,
            });
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn get_u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn get_i64(&mut self) -> Result<i64> {
        let b = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(b);
        Ok(i64::from_le_bytes(raw))
    }

    /// Any non-zero byte decodes as true.
    pub fn get_bool(&mut self) -> Result<bool> {
        Ok(self.take(1)?[0] != 0)
    }

    /// A `u32` length prefix followed by that many raw bytes, as UTF-8.
    pub fn get_string(&mut self) -> Result<String> {
        let len = self.get_u32()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| FsError::InvalidName)
    }
}

#[derive(Default)]
pub(crate) struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn put_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn put_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn put_bool(&mut self, v: bool) {
        self.buf.push(v as u8);
    }

    pub fn put_string(&mut self, s: &str) {
        self.put_u32(s.len() as u32);
        self.put_bytes(s.as_bytes());
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

impl SuperBlock {
    pub(crate) fn encode(&self, w: &mut ByteWriter) {
        w.put_u32(self.total_blocks);
        w.put_u32(self.block_size);
    }

    pub(crate) fn decode(r: &mut ByteReader) -> Result<Self> {
        Ok(SuperBlock {
            total_blocks: r.get_u32()?,
            block_size: r.get_u32()?,
        })
    }
}

impl Permission {
    // Fixed width on the wire, not length-prefixed.
    pub(crate) fn encode(&self, w: &mut ByteWriter) {
        w.put_bytes(self.as_bytes());
    }

    pub(crate) fn decode(r: &mut ByteReader) -> Result<Self> {
        let mut raw = [0u8; PERMISSION_LEN];
        raw.copy_from_slice(r.take(PERMISSION_LEN)?);
        Ok(Permission::from_bytes(raw))
    }
}

impl DirEntry {
    pub(crate) fn encode(&self, w: &mut ByteWriter) {
        w.put_string(&self.name);
        w.put_u32(self.inode);
        self.permission.encode(w);
    }

    pub(crate) fn decode(r: &mut ByteReader) -> Result<Self> {
        Ok(DirEntry {
            name: r.get_string()?,
            inode: r.get_u32()?,
            permission: Permission::decode(r)?,
        })
    }
}

impl Inode {
    pub(crate) fn encode(&self, w: &mut ByteWriter) {
        w.put_u32(self.data.len() as u32);
        w.put_bytes(&self.data);
        w.put_bool(self.used);
        self.permission.encode(w);
        w.put_i64(self.created_at);
        w.put_i64(self.updated_at);
    }

    pub(crate) fn decode(r: &mut ByteReader) -> Result<Self> {
        let data_len = r.get_u32()? as usize;
        let data = r.take(data_len)?.to_vec();
        Ok(Inode {
            data,
            used: r.get_bool()?,
            permission: Permission::decode(r)?,
            created_at: r.get_i64()?,
            updated_at: r.get_i64()?,
        })
    }
}
