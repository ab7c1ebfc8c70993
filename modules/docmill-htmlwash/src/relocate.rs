use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;
use walkdir::WalkDir;

use docmill_common::DocmillError;

/// Move every `.html` file under `src` directly into `dest`, creating
/// `dest` first if needed. Colliding names get an incrementing `_N` suffix
/// before the extension. The source directory structure is discarded;
/// non-HTML files stay where they are. Returns the number of files moved.
pub fn relocate_html_files(src: &Path, dest: &Path) -> Result<usize, DocmillError> {
    fs::create_dir_all(dest)?;

    let mut moved = 0;
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| DocmillError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(".html") {
            continue;
        }

        let target = free_destination(dest, &name);
        move_file(entry.path(), &target)?;
        info!(file = %name, to = %target.display(), "Moved");
        moved += 1;
    }
    Ok(moved)
}

/// First non-existing path for `filename` inside `dest_dir`, suffixing
/// `_1`, `_2`, … before the extension until the name is free.
fn free_destination(dest_dir: &Path, filename: &str) -> PathBuf {
    let candidate = dest_dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = match filename.rsplit_once('.') {
        Some((stem, ext)) => (stem, ext),
        None => (filename, ""),
    };

    let mut counter = 1;
    loop {
        let name = if ext.is_empty() {
            format!("{stem}_{counter}")
        } else {
            format!("{stem}_{counter}.{ext}")
        };
        let candidate = dest_dir.join(name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

fn move_file(from: &Path, to: &Path) -> Result<(), DocmillError> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        // Cross-device rename fails with EXDEV; fall back to copy + remove.
        Err(_) => {
            fs::copy(from, to)?;
            fs::remove_file(from)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn collision_gets_numeric_suffix() {
        let root = tempfile::tempdir().unwrap();
        let src = root.path().join("src");
        let dest = root.path().join("dest");
        fs::create_dir_all(src.join("a")).unwrap();
        fs::create_dir_all(src.join("b")).unwrap();
        fs::write(src.join("a/page.html"), "content one").unwrap();
        fs::write(src.join("b/page.html"), "content two").unwrap();

        let moved = relocate_html_files(&src, &dest).unwrap();
        assert_eq!(moved, 2);

        assert!(dest.join("page.html").exists());
        assert!(dest.join("page_1.html").exists());
        assert!(!src.join("a/page.html").exists());
        assert!(!src.join("b/page.html").exists());

        // Walk order is unspecified, so check content as a set.
        let contents: HashSet<String> = ["page.html", "page_1.html"]
            .iter()
            .map(|n| fs::read_to_string(dest.join(n)).unwrap())
            .collect();
        assert_eq!(
            contents,
            HashSet::from(["content one".to_string(), "content two".to_string()])
        );
    }

    #[test]
    fn creates_missing_destination_directory() {
        let root = tempfile::tempdir().unwrap();
        let src = root.path().join("src");
        let dest = root.path().join("nested/dest");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("page.html"), "x").unwrap();

        relocate_html_files(&src, &dest).unwrap();
        assert!(dest.join("page.html").exists());
        assert!(!src.join("page.html").exists());
    }

    #[test]
    fn non_html_files_stay_in_place() {
        let root = tempfile::tempdir().unwrap();
        let src = root.path().join("src");
        let dest = root.path().join("dest");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("notes.txt"), "keep me").unwrap();
        fs::write(src.join("page.html"), "move me").unwrap();

        let moved = relocate_html_files(&src, &dest).unwrap();
        assert_eq!(moved, 1);
        assert!(src.join("notes.txt").exists());
        assert!(!dest.join("notes.txt").exists());
    }

    #[test]
    fn repeated_collisions_keep_counting() {
        let root = tempfile::tempdir().unwrap();
        let dest = root.path();
        fs::write(dest.join("page.html"), "").unwrap();
        fs::write(dest.join("page_1.html"), "").unwrap();

        let free = free_destination(dest, "page.html");
        assert_eq!(free.file_name().unwrap(), "page_2.html");
    }
}
