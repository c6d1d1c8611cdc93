use dircmp_common::HashAlgo;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const CHUNK_SIZE: usize = 64 * 1024;

/// Separator between the two hex digests in `both` mode. Internal to the
/// hasher/matcher boundary; not a portable hash format.
const FINGERPRINT_DELIMITER: char = '|';

/// Compute the content fingerprint of one file.
///
/// The file is streamed through the digest(s) in fixed-size chunks, so memory
/// use stays bounded regardless of file size. Any open or read error is
/// returned as-is; a partial digest is never produced. The file handle is
/// dropped on every exit path, including errors.
pub fn fingerprint(path: &Path, algo: HashAlgo) -> io::Result<String> {
    let mut file = File::open(path)?;

    match algo {
        HashAlgo::Sha256 => {
            let mut hasher = Sha256::new();
            feed(&mut file, |chunk| {
                hasher.update(chunk);
            })?;
            Ok(hex::encode(hasher.finalize()))
        }
        HashAlgo::Blake3 => {
            let mut hasher = blake3::Hasher::new();
            feed(&mut file, |chunk| {
                hasher.update(chunk);
            })?;
            Ok(hasher.finalize().to_hex().to_string())
        }
        HashAlgo::Both => {
            let mut sha256 = Sha256::new();
            let mut b3 = blake3::Hasher::new();
            feed(&mut file, |chunk| {
                sha256.update(chunk);
                b3.update(chunk);
            })?;
            Ok(format!(
                "{}{}{}",
                hex::encode(sha256.finalize()),
                FINGERPRINT_DELIMITER,
                b3.finalize().to_hex()
            ))
        }
    }
}

fn feed<F>(file: &mut File, mut update: F) -> io::Result<()>
where
    F: FnMut(&[u8]),
{
    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            return Ok(());
        }
        update(&buffer[..n]);
    }
}
