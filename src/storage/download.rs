use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tally_core::{CoreError, DownloadSink};

/// Delivers exports as files inside a target directory.
#[derive(Debug, Clone)]
pub struct FileDownloadSink {
    dir: PathBuf,
}

impl FileDownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl DownloadSink for FileDownloadSink {
    fn deliver(&self, file_name: &str, contents: &str) -> Result<(), CoreError> {
        if file_name.is_empty() || Path::new(file_name).file_name().is_none() {
            return Err(CoreError::Sink(format!("invalid file name `{file_name}`")));
        }
        let path = self.path_for(file_name);
        write_file(&self.dir, &path, contents)
            .map_err(|err| CoreError::Sink(format!("{}: {err}", path.display())))?;
        tracing::info!(path = %path.display(), bytes = contents.len(), "export written");
        Ok(())
    }
}

fn write_file(dir: &Path, path: &Path, contents: &str) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()
}
