use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::Histogram;
use crate::error::{PlotError, PlotResult};
use crate::io::{FileContents, Storage, StoredObject};
use crate::render::SceneCanvas;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FileMode {
    /// Existing file, no writes.
    #[default]
    Read,
    /// New file; fails if the path already exists.
    Create,
    /// New file replacing any existing one.
    Recreate,
    /// Existing file extended in place, created when missing.
    Update,
}

impl FileMode {
    #[must_use]
    pub fn is_writable(self) -> bool {
        !matches!(self, Self::Read)
    }
}

/// Open handle on a keyed object file.
///
/// Writable files are flushed on [`DataFile::close`], or on drop when the
/// caller never closed them.
pub struct DataFile {
    path: String,
    mode: FileMode,
    contents: FileContents,
    storage: Rc<dyn Storage>,
    dirty: bool,
    closed: bool,
}

impl fmt::Debug for DataFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataFile")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("objects", &self.contents.objects.len())
            .field("dirty", &self.dirty)
            .field("closed", &self.closed)
            .finish()
    }
}

impl DataFile {
    pub fn open(storage: Rc<dyn Storage>, path: &str, mode: FileMode) -> PlotResult<Self> {
        let contents = match mode {
            FileMode::Read => storage
                .load(path)?
                .ok_or_else(|| PlotError::missing(format!("file `{path}`")))?,
            FileMode::Create => {
                if storage.exists(path)? {
                    return Err(PlotError::InvalidState {
                        operation: "create existing file",
                        state: "exists",
                    });
                }
                FileContents::default()
            }
            FileMode::Recreate => FileContents::default(),
            FileMode::Update => storage.load(path)?.unwrap_or_default(),
        };
        for object in contents.objects.values() {
            object.validate()?;
        }
        debug!(path, ?mode, objects = contents.objects.len(), "open data file");
        Ok(Self {
            path: path.to_owned(),
            mode,
            contents,
            storage,
            dirty: matches!(mode, FileMode::Create | FileMode::Recreate),
            closed: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn mode(&self) -> FileMode {
        self.mode
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.closed
    }

    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.contents.objects.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StoredObject> {
        self.contents.objects.get(name)
    }

    #[must_use]
    pub fn histogram(&self, name: &str) -> Option<&Histogram> {
        match self.get(name)? {
            StoredObject::Histogram(hist) => Some(hist),
            StoredObject::Canvas(_) => None,
        }
    }

    #[must_use]
    pub fn canvas(&self, name: &str) -> Option<&SceneCanvas> {
        match self.get(name)? {
            StoredObject::Canvas(canvas) => Some(canvas),
            StoredObject::Histogram(_) => None,
        }
    }

    pub fn write(&mut self, object: StoredObject) -> PlotResult<()> {
        if self.closed {
            return Err(PlotError::InvalidState {
                operation: "write",
                state: "closed",
            });
        }
        if !self.mode.is_writable() {
            return Err(PlotError::InvalidState {
                operation: "write",
                state: "read-only",
            });
        }
        let name = object.name().to_owned();
        if self.contents.objects.contains_key(&name) {
            warn!(path = %self.path, name = %name, "replacing existing object");
        }
        self.contents.objects.insert(name, object);
        self.dirty = true;
        Ok(())
    }

    pub fn write_histogram(&mut self, hist: Histogram) -> PlotResult<()> {
        self.write(StoredObject::Histogram(hist))
    }

    pub fn write_canvas(&mut self, canvas: SceneCanvas) -> PlotResult<()> {
        self.write(StoredObject::Canvas(canvas))
    }

    /// Flushes pending writes; the handle is unusable afterwards.
    pub fn close(&mut self) -> PlotResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.flush()
    }

    fn flush(&mut self) -> PlotResult<()> {
        if self.mode.is_writable() && self.dirty {
            self.storage.store(&self.path, &self.contents)?;
            self.dirty = false;
            debug!(path = %self.path, objects = self.contents.objects.len(), "flushed data file");
        }
        Ok(())
    }
}

impl Drop for DataFile {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(err) = self.flush() {
            warn!(path = %self.path, error = %err, "failed to flush data file on drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::{DataFile, FileMode};
    use crate::core::Histogram;
    use crate::error::PlotError;
    use crate::io::{MemoryStorage, Storage};

    #[test]
    fn read_mode_requires_existing_file_and_rejects_writes() {
        let storage = MemoryStorage::new();
        let shared: Rc<dyn Storage> = Rc::new(storage.clone());
        let err = DataFile::open(Rc::clone(&shared), "missing.json", FileMode::Read)
            .expect_err("missing file");
        assert!(format!("{err}").contains("missing.json"));

        storage.insert_histograms(
            "in.json",
            [Histogram::new_1d("hA", "", 2, 0.0, 2.0).expect("hist")],
        );
        let mut file = DataFile::open(shared, "in.json", FileMode::Read).expect("open");
        assert!(file.histogram("hA").is_some());
        let hist = Histogram::new_1d("hB", "", 2, 0.0, 2.0).expect("hist");
        assert!(file.write_histogram(hist).is_err());
    }

    #[test]
    fn dropped_writable_file_is_flushed() {
        let storage = MemoryStorage::new();
        {
            let mut file = DataFile::open(Rc::new(storage.clone()), "out.json", FileMode::Recreate)
                .expect("open");
            let hist = Histogram::new_1d("hA", "", 2, 0.0, 2.0).expect("hist");
            file.write_histogram(hist).expect("write");
        }
        let contents = storage.contents("out.json").expect("flushed");
        assert!(contents.objects.contains_key("hA"));
    }

    #[test]
    fn close_ends_the_handle() {
        let storage = MemoryStorage::new();
        let mut file =
            DataFile::open(Rc::new(storage.clone()), "out.json", FileMode::Recreate).expect("open");
        assert!(file.is_open());
        file.close().expect("close");
        assert!(!file.is_open());
        let hist = Histogram::new_1d("hA", "", 2, 0.0, 2.0).expect("hist");
        assert!(file.write_histogram(hist).is_err());
        assert_eq!(storage.paths(), ["out.json"]);
    }

    #[test]
    fn malformed_stored_histogram_is_rejected_on_open() {
        let storage = MemoryStorage::new();
        let bad: Histogram = serde_json::from_str(
            r#"{"name":"hBad","title":"","dimension":1,
                "axes":[{"edges":[0,1,2]},{"edges":[0,1]},{"edges":[0,1]}],
                "contents":[],"sumw2":[]}"#,
        )
        .expect("well-formed json");
        storage.insert_histograms("bad.json", [bad]);
        let err = DataFile::open(Rc::new(storage), "bad.json", FileMode::Read)
            .expect_err("inconsistent cells");
        assert!(matches!(err, PlotError::InvalidData(message) if message.contains("hBad")));
    }

    #[test]
    fn create_mode_refuses_existing_path() {
        let storage = MemoryStorage::new();
        storage.insert_histograms("taken.json", []);
        assert!(DataFile::open(Rc::new(storage), "taken.json", FileMode::Create).is_err());
    }
}
