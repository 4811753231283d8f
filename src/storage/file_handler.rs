use std::{
    fs::{File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::types::error::DatabaseError;

/// Byte-addressable read/write access to a single store file.
pub struct FileHandler {
    pub path: PathBuf,
    file: File,
    file_length: u64,
}

impl FileHandler {
    /// Opens `path` for reading and writing, creating it if it does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        let file_length = file.metadata()?.len();
        debug!(path = %path.display(), file_length, "file.open");
        Ok(Self {
            path: path.to_path_buf(),
            file,
            file_length,
        })
    }

    pub fn len(&self) -> u64 {
        self.file_length
    }

    pub fn is_empty(&self) -> bool {
        self.file_length == 0
    }

    pub fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<(), DatabaseError> {
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(data)?;
        self.file.flush()?;
        self.file_length = self.file_length.max(offset + data.len() as u64);
        Ok(())
    }

    /// Fills `into` from `offset`. Bytes past the end of the file read as zero.
    pub fn read_at(&mut self, offset: u64, into: &mut [u8]) -> Result<(), DatabaseError> {
        into.fill(0);
        if offset >= self.file_length {
            return Ok(());
        }

        self.file.seek(SeekFrom::Start(offset))?;
        let mut filled = 0;
        while filled < into.len() {
            match self.file.read(&mut into[filled..])? {
                0 => break,
                n => filled += n,
            }
        }
        Ok(())
    }
}
