use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// `.gz` extension, or gzip magic at the current file position.
pub fn is_gzip(path: &Path, file: &mut File) -> bool {
    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        return true;
    }
    sniff_magic(file).unwrap_or(false)
}

fn sniff_magic<R: Read + Seek>(mut r: R) -> io::Result<bool> {
    let pos = r.stream_position()?;
    let mut magic = [0u8; 2];
    let n = r.read(&mut magic)?;
    r.seek(SeekFrom::Start(pos))?;
    Ok(n == GZIP_MAGIC.len() && magic == GZIP_MAGIC)
}
