use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Histogram;
use crate::error::{PlotError, PlotResult};
use crate::render::SceneCanvas;

/// Any object that can be stored under a key in a data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "object")]
pub enum StoredObject {
    Histogram(Histogram),
    Canvas(SceneCanvas),
}

impl StoredObject {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Histogram(hist) => &hist.name,
            Self::Canvas(canvas) => &canvas.name,
        }
    }

    /// Validates every histogram held by the object.
    pub fn validate(&self) -> PlotResult<()> {
        match self {
            Self::Histogram(hist) => hist.validate(),
            Self::Canvas(canvas) => canvas
                .pads
                .iter()
                .flat_map(|pad| pad.histograms())
                .try_for_each(Histogram::validate),
        }
    }
}

/// Keyed objects of one data file, in insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FileContents {
    pub objects: IndexMap<String, StoredObject>,
}

/// Backing store for data files.
pub trait Storage {
    fn load(&self, path: &str) -> PlotResult<Option<FileContents>>;
    fn store(&self, path: &str, contents: &FileContents) -> PlotResult<()>;

    fn exists(&self, path: &str) -> PlotResult<bool> {
        Ok(self.load(path)?.is_some())
    }
}

/// One JSON document per file path on the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStorage;

impl Storage for DiskStorage {
    fn load(&self, path: &str) -> PlotResult<Option<FileContents>> {
        if !Path::new(path).exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path).map_err(|source| PlotError::Io {
            path: path.to_owned(),
            source,
        })?;
        let contents = serde_json::from_str(&raw).map_err(|e| {
            PlotError::Serialization(format!("failed to parse data file `{path}`: {e}"))
        })?;
        Ok(Some(contents))
    }

    fn store(&self, path: &str, contents: &FileContents) -> PlotResult<()> {
        let raw = serde_json::to_string(contents).map_err(|e| {
            PlotError::Serialization(format!("failed to serialize data file `{path}`: {e}"))
        })?;
        fs::write(path, raw).map_err(|source| PlotError::Io {
            path: path.to_owned(),
            source,
        })
    }

    fn exists(&self, path: &str) -> PlotResult<bool> {
        Ok(Path::new(path).exists())
    }
}

/// Shared in-memory file system; clones see the same files.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: Rc<RefCell<HashMap<String, FileContents>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a file holding `histograms`.
    pub fn insert_histograms<I>(&self, path: &str, histograms: I)
    where
        I: IntoIterator<Item = Histogram>,
    {
        let mut files = self.files.borrow_mut();
        let contents = files.entry(path.to_owned()).or_default();
        for hist in histograms {
            contents
                .objects
                .insert(hist.name.clone(), StoredObject::Histogram(hist));
        }
    }

    #[must_use]
    pub fn contents(&self, path: &str) -> Option<FileContents> {
        self.files.borrow().get(path).cloned()
    }

    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.borrow().keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl Storage for MemoryStorage {
    fn load(&self, path: &str) -> PlotResult<Option<FileContents>> {
        Ok(self.files.borrow().get(path).cloned())
    }

    fn store(&self, path: &str, contents: &FileContents) -> PlotResult<()> {
        self.files
            .borrow_mut()
            .insert(path.to_owned(), contents.clone());
        Ok(())
    }
}
