use crate::error::{Result, WordCountError};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Checks that `root` exists and is a directory.
pub fn check_root(root: &Path) -> Result<()> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(WordCountError::NotADirectory(root.to_path_buf())),
        Err(_) => Err(WordCountError::RootNotFound(root.to_path_buf())),
    }
}

/// Recursive walk handing every regular file under `root` to `visit`.
///
/// Nothing is filtered: hidden files and files named in ignore files are
/// visited too. Entries are visited in file name order within a directory.
/// With `follow_links`, a link to a regular file is visited as a file and a
/// link to a directory is descended into.
/// The first unreadable directory or entry ends the walk with an error, as
/// does the first error returned by `visit`.
///
/// Returns the number of files visited.
pub fn walk_files<F>(root: &Path, follow_links: bool, mut visit: F) -> Result<u64>
where
    F: FnMut(PathBuf) -> Result<()>,
{
    check_root(root)?;

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(follow_links)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = 0;
    for entry in walker {
        let entry = entry?;
        let Some(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_file() {
            trace!(path = %entry.path().display(), "discovered file");
            files += 1;
            visit(entry.into_path())?;
        } else if !file_type.is_dir() {
            debug!(path = %entry.path().display(), "skipping non-regular entry");
        }
    }

    Ok(files)
}
