//! Static asset copying

use std::fs;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::SiteResult;

/// Copy every file under `src` into `dest`, keeping relative paths.
/// Returns the number of files copied.
pub fn copy_assets(src: &Path, dest: &Path) -> SiteResult<usize> {
    debug!(?src, ?dest, "copy_assets: called");
    let mut copied = 0;

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            warn!("Skipping asset outside {}: {}", src.display(), entry.path().display());
            continue;
        };
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    debug!(%copied, "copy_assets: done");
    Ok(copied)
}
