//! Writing the rendered tree to disk.

use std::collections::BTreeSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::CodegenResult;
use crate::render::{GENERATED_NOTE, GeneratedFile};

/// What a write pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: usize,
    pub unchanged: usize,
    pub removed: usize,
}

/// Writes every file under `out_dir`, replacing each one atomically.
///
/// Files whose contents already match are left alone so their timestamps
/// do not trigger rebuilds. Generated files left over from relations that
/// are no longer rendered are deleted; hand-written files are kept.
pub fn write_files(out_dir: &Path, files: &[GeneratedFile]) -> CodegenResult<WriteSummary> {
    let mut summary = WriteSummary {
        removed: remove_stale(out_dir, files)?,
        ..WriteSummary::default()
    };

    for file in files {
        let path = out_dir.join(&file.path);
        if fs::read(&path).is_ok_and(|existing| existing == file.contents.as_bytes()) {
            summary.unchanged += 1;
            continue;
        }

        write_bytes_atomic(&path, file.contents.as_bytes())?;
        tracing::debug!(path = %path.display(), "wrote generated file");
        summary.written += 1;
    }

    Ok(summary)
}

fn remove_stale(out_dir: &Path, files: &[GeneratedFile]) -> io::Result<usize> {
    let keep: BTreeSet<PathBuf> = files.iter().map(|file| out_dir.join(&file.path)).collect();
    let dirs: BTreeSet<PathBuf> = keep
        .iter()
        .filter_map(|path| path.parent().map(Path::to_path_buf))
        .collect();

    let mut removed = 0;
    for dir in dirs {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) => return Err(err),
        };
        for entry in entries {
            let path = entry?.path();
            let is_source = path.extension().is_some_and(|ext| ext == "rs");
            if !is_source || keep.contains(&path) || !is_generated(&path)? {
                continue;
            }
            fs::remove_file(&path)?;
            tracing::info!(path = %path.display(), "removed stale generated file");
            removed += 1;
        }
    }

    Ok(removed)
}

fn is_generated(path: &Path) -> io::Result<bool> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents.contains(GENERATED_NOTE)),
        Err(err) if err.kind() == io::ErrorKind::InvalidData => Ok(false),
        Err(err) => Err(err),
    }
}

/// Writes to a sibling `.tmp` file, syncs it, then renames it over `path`.
pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let parent = path.parent().filter(|dir| !dir.as_os_str().is_empty());
    if let Some(dir) = parent {
        fs::create_dir_all(dir)?;
    }

    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("`{}` has no file name", path.display()),
        )
    })?;
    let tmp_path = path.with_file_name(format!("{}.tmp", file_name.to_string_lossy()));

    let mut tmp = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;
    tmp.write_all(data)?;
    tmp.sync_all()?;

    fs::rename(&tmp_path, path)?;
    if let Some(dir) = parent {
        File::open(dir)?.sync_all()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn file(path: &str, contents: &str) -> GeneratedFile {
        GeneratedFile {
            path: PathBuf::from(path),
            contents: contents.to_string(),
        }
    }

    #[test]
    fn writes_nested_files_and_skips_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            file("mod.rs", "pub mod public;\n"),
            file("public/profiles.rs", "pub struct Profiles;\n"),
        ];

        let first = write_files(dir.path(), &files).unwrap();
        assert_eq!(
            first,
            WriteSummary {
                written: 2,
                unchanged: 0,
                removed: 0,
            }
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("public/profiles.rs")).unwrap(),
            "pub struct Profiles;\n"
        );

        let second = write_files(dir.path(), &files).unwrap();
        assert_eq!(
            second,
            WriteSummary {
                written: 0,
                unchanged: 2,
                removed: 0,
            }
        );
        assert!(!dir.path().join("public/profiles.rs.tmp").exists());
    }

    #[test]
    fn overwrites_changed_files() {
        let dir = tempfile::tempdir().unwrap();
        write_files(dir.path(), &[file("mod.rs", "old\n")]).unwrap();

        let summary = write_files(dir.path(), &[file("mod.rs", "new\n")]).unwrap();
        assert_eq!(summary.written, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("mod.rs")).unwrap(),
            "new\n"
        );
    }

    #[test]
    fn removes_generated_files_that_were_not_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let note = format!("//! {GENERATED_NOTE}\n");
        let files = vec![
            file("public/mod.rs", &note),
            file("public/profiles.rs", &note),
            file("public/old_paths.rs", &note),
        ];
        write_files(dir.path(), &files).unwrap();
        fs::write(dir.path().join("public/helpers.rs"), "pub fn helper() {}\n").unwrap();

        let summary = write_files(dir.path(), &files[..2]).unwrap();
        assert_eq!(summary.removed, 1);
        assert_eq!(summary.unchanged, 2);
        assert!(!dir.path().join("public/old_paths.rs").exists());
        assert!(dir.path().join("public/helpers.rs").is_file());
    }
}
