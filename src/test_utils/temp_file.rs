use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// A unique path in the system temp directory that is deleted on drop.
///
/// The file itself is not created, so tests can exercise a missing store.
pub(crate) struct TempFile {
    path: PathBuf,
}

impl TempFile {
    pub(crate) fn new(name: &str) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "cashbook-{}-{id}-{name}",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        Self { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);

        let mut temporary = self.path.clone().into_os_string();
        temporary.push(".tmp");
        let _ = fs::remove_file(temporary);
    }
}
