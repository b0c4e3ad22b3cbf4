use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory '{}' already exists", .0.display())]
    OutputExists(PathBuf),
    #[error("challenge directory '{}' already exists", .0.display())]
    ChallengeExists(PathBuf),
    #[error("file '{}' already exists", .0.display())]
    FileExists(PathBuf),
    #[error("io error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PersistError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Create the archive root. A pre-existing path of any kind is refused.
pub fn create_output_root(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        return Err(PersistError::OutputExists(dir.to_path_buf()));
    }
    fs::create_dir_all(dir).map_err(|e| PersistError::io(dir, e))
}

/// Create `{root}/{name}`; the directory must not exist yet.
pub fn create_challenge_dir(root: &Path, name: &str) -> Result<PathBuf, PersistError> {
    let dir = root.join(name);
    match fs::create_dir(&dir) {
        Ok(()) => Ok(dir),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            Err(PersistError::ChallengeExists(dir))
        }
        Err(e) => Err(PersistError::io(&dir, e)),
    }
}

/// Atomically writes new files into `dir` by writing a temp file then renaming.
/// Existing files are never replaced.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write_new(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| PersistError::io(&self.dir, e))?;
        fill(&mut tmp, content).map_err(|e| PersistError::io(&target, e))?;

        tmp.persist_noclobber(&target).map_err(|e| {
            if e.error.kind() == io::ErrorKind::AlreadyExists {
                PersistError::FileExists(target.clone())
            } else {
                PersistError::io(&target, e.error)
            }
        })?;
        Ok(target)
    }
}

fn fill(tmp: &mut NamedTempFile, content: &str) -> io::Result<()> {
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()
}
