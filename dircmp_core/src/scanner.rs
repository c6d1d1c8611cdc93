use crate::hasher;
use dircmp_common::{DircmpError, FileFingerprint, HashAlgo, ScanResult, MAX_NAME_LEN};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// List the regular files directly inside `folder` and fingerprint each one.
///
/// Directories, symlinks and other special entries are skipped. A folder that
/// cannot be opened is a fatal `FolderOpen` error; a file that cannot be
/// hashed is recorded with an invalid fingerprint and the scan continues.
/// Entries keep whatever order the directory listing yields.
pub fn scan(folder: &Path, algo: HashAlgo) -> Result<ScanResult, DircmpError> {
    let read_dir = fs::read_dir(folder).map_err(|source| DircmpError::FolderOpen {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();

    for entry in read_dir {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable directory entry in {:?}: {}", folder, err);
                continue;
            }
        };

        // DirEntry::file_type does not follow symlinks, so links to regular
        // files are still skipped here.
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(err) => {
                warn!("cannot stat {:?}: {}", entry.path(), err);
                continue;
            }
        };
        if !file_type.is_file() {
            continue;
        }

        // Name matching is defined over UTF-8 strings
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!("skipping non-UTF-8 file name {:?} in {:?}", raw, folder);
                continue;
            }
        };

        let path = entry.path();
        let fingerprint = if name.len() > MAX_NAME_LEN {
            warn!(
                "file name longer than {} bytes treated as unreadable: {:?}",
                MAX_NAME_LEN, path
            );
            None
        } else {
            match hasher::fingerprint(&path, algo) {
                Ok(fp) => Some(fp),
                Err(err) => {
                    warn!("failed to hash {:?}: {}", path, err);
                    None
                }
            }
        };

        files.push(FileFingerprint {
            name,
            path,
            fingerprint,
        });
    }

    debug!("scanned {} regular files in {:?}", files.len(), folder);

    Ok(ScanResult {
        root: folder.to_path_buf(),
        files,
    })
}
