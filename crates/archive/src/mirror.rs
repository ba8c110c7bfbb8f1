//! Mirror rebuild
//!
//! The mirror is the canonical current state of one station: every
//! non-preliminary detection file, flattened by basename, plus verbatim
//! copies of the three metadata exports. It is destroyed and recreated
//! wholesale on every run; only snapshots accrete.

use crate::error::Result;
use crate::scan::{self, StationSource};
use seisarc_core::{layout, Category, Roots};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// A station's rebuilt `all/` directory.
#[derive(Debug, Clone)]
pub struct Mirror {
    root: PathBuf,
}

impl Mirror {
    /// The mirror root, `<mirror_root>/<code>/all`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// One category's subdirectory.
    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.root.join(category.dir_name())
    }

    /// The metadata subdirectory.
    pub fn meta_dir(&self) -> PathBuf {
        self.root.join(layout::META_DIR)
    }

    /// Current basenames of one category.
    pub fn basenames(&self, category: Category) -> Result<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        for entry in fs::read_dir(self.category_dir(category))? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                if category.matches(name) {
                    names.insert(name.to_string());
                }
            }
        }
        Ok(names)
    }
}

/// Rebuilds station mirrors from the live processing tree.
pub struct MirrorBuilder<'a> {
    roots: &'a Roots,
}

impl<'a> MirrorBuilder<'a> {
    /// A builder over the configured roots.
    pub fn new(roots: &'a Roots) -> Self {
        MirrorBuilder { roots }
    }

    /// Destructively rebuild one station's mirror from its source directory.
    ///
    /// The source is scanned and the exports resolved before the old mirror
    /// is removed, so a broken source aborts with the previous mirror
    /// intact and no snapshot is ever written from a partial rebuild.
    pub fn rebuild(&self, station: &StationSource) -> Result<Mirror> {
        let exports = scan::export_paths(&station.dir)?;
        let waveforms = scan::scan_category(&station.dir, Category::Waveform)?;
        let secondaries = scan::scan_category(&station.dir, Category::Secondary)?;

        let root = self.roots.mirror_dir(&station.code);
        if root.exists() {
            fs::remove_dir_all(&root)?;
        }
        let mirror = Mirror { root };

        copy_flat(&waveforms, &mirror.category_dir(Category::Waveform))?;
        copy_flat(&secondaries, &mirror.category_dir(Category::Secondary))?;
        copy_flat(&exports, &mirror.meta_dir())?;

        info!(
            station = %station.code,
            waveforms = waveforms.len(),
            secondaries = secondaries.len(),
            "rebuilt mirror"
        );
        Ok(mirror)
    }
}

/// Copy files into `dest` by basename, creating `dest` first.
fn copy_flat(files: &[PathBuf], dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)?;
    for file in files {
        if let Some(name) = layout::basename(file) {
            fs::copy(file, dest.join(name))?;
        }
    }
    Ok(())
}
