use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::Builder;
use tracing::{debug, info};

use crate::diff::build_unified_diff;
use crate::error::{AssemblyError, AssemblyResult};

pub const ASSEMBLY_FILE_NAME: &str = "assembly.xml";

/// Previous document kept when overwriting with backups enabled.
pub const BACKUP_FILE_NAME: &str = "assembly.xml.bak";

#[derive(Debug, Clone)]
pub struct WriteOptions {
    pub dry_run: bool,
    pub backup: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            backup: true,
        }
    }
}

#[derive(Debug)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub changed: bool,
    pub diff: Option<String>,
}

/// Writes `document` to `dir/assembly.xml`, reporting the diff against the
/// previous file. The directory must already exist.
pub fn write_assembly(
    dir: &Path,
    document: &str,
    options: &WriteOptions,
) -> AssemblyResult<WriteOutcome> {
    let path = dir.join(ASSEMBLY_FILE_NAME);
    let previous = match fs::read_to_string(&path) {
        Ok(previous) => Some(previous),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(source) => return Err(AssemblyError::Io { path, source }),
    };

    let diff = build_unified_diff(
        previous.as_deref().unwrap_or_default(),
        document,
        ASSEMBLY_FILE_NAME,
    );
    let changed = previous.as_deref() != Some(document);

    debug!(path = %path.display(), changed, dry_run = options.dry_run, "assembly document rendered");

    if changed && !options.dry_run {
        let backup = options.backup && previous.is_some();
        if let (true, Some(previous)) = (backup, previous.as_deref()) {
            let backup_path = dir.join(BACKUP_FILE_NAME);
            fs::write(&backup_path, previous).map_err(|source| AssemblyError::Io {
                path: backup_path,
                source,
            })?;
        }
        replace_file(dir, &path, document).map_err(|source| AssemblyError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), backup, "wrote assembly document");
    }

    Ok(WriteOutcome {
        path,
        changed,
        diff,
    })
}

/// Stages `contents` in a hidden file next to `path` and renames it into place,
/// so readers see either the old document or the new one.
fn replace_file(dir: &Path, path: &Path, contents: &str) -> io::Result<()> {
    let mut staged = Builder::new()
        .prefix(".assembly")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    staged.write_all(contents.as_bytes())?;
    staged.as_file().sync_all()?;
    staged.persist(path).map(drop).map_err(|err| err.error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn replaces_document_and_keeps_backup() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(ASSEMBLY_FILE_NAME), "<old/>\n").unwrap();

        let outcome = write_assembly(dir.path(), "<new/>\n", &WriteOptions::default()).unwrap();

        assert!(outcome.changed);
        assert_eq!(
            fs::read_to_string(dir.path().join(ASSEMBLY_FILE_NAME)).unwrap(),
            "<new/>\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join(BACKUP_FILE_NAME)).unwrap(),
            "<old/>\n"
        );
        assert_eq!(entries(dir.path()), vec![ASSEMBLY_FILE_NAME, BACKUP_FILE_NAME]);
    }

    #[test]
    fn staging_file_does_not_outlive_the_write() {
        let dir = tempdir().unwrap();

        replace_file(dir.path(), &dir.path().join(ASSEMBLY_FILE_NAME), "<a/>").unwrap();

        assert_eq!(entries(dir.path()), vec![ASSEMBLY_FILE_NAME]);
    }

    #[test]
    fn backup_can_be_disabled() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(ASSEMBLY_FILE_NAME), "<old/>\n").unwrap();
        let options = WriteOptions {
            backup: false,
            ..WriteOptions::default()
        };

        write_assembly(dir.path(), "<new/>\n", &options).unwrap();

        assert_eq!(entries(dir.path()), vec![ASSEMBLY_FILE_NAME]);
    }
}
