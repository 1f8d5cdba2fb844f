use std::io::{self, BufRead, Cursor, Read, Seek, SeekFrom, Write};

/// Read-only file over the contents of a git blob.
///
/// The blob is loaded into memory when the file is opened.
#[derive(Debug, Clone)]
pub struct GitFile {
    name: String,
    cursor: Cursor<Vec<u8>>,
}

impl GitFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        GitFile {
            name: name.into(),
            cursor: Cursor::new(data),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn readable(&self) -> bool {
        true
    }

    pub fn writable(&self) -> bool {
        false
    }

    pub fn len(&self) -> u64 {
        self.cursor.get_ref().len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.get_ref().is_empty()
    }

    /// Consumes the file and returns the whole blob.
    pub fn into_bytes(self) -> Vec<u8> {
        self.cursor.into_inner()
    }
}

impl Read for GitFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl BufRead for GitFile {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.cursor.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.cursor.consume(amt)
    }
}

impl Seek for GitFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl Write for GitFile {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("{} is read only", self.name),
        ))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
