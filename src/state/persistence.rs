use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PersistenceError, PersistenceResult};
use crate::grid::GridCellStore;
use crate::util::time;

const STORE_FILE: &str = "palettes.json";
const STORE_VERSION: u32 = 1;

/// A named, saved palette grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub id: Uuid,
    pub name: String,
    pub grid: GridCellStore,
    /// Seconds since the UNIX epoch
    pub created_at: u64,
    pub updated_at: u64,
}

impl Palette {
    /// Create a palette from the current grid contents
    pub fn new(name: impl Into<String>, grid: GridCellStore) -> Self {
        let now = time::timestamp_secs();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            grid,
            created_at: now,
            updated_at: now,
        }
    }

    fn validate(&self) -> PersistenceResult<()> {
        if self.name.trim().is_empty() {
            return Err(PersistenceError::InvalidPalette("palette name is empty".to_string()));
        }
        if self.grid.is_empty() {
            return Err(PersistenceError::InvalidPalette(format!(
                "palette '{}' has no swatches",
                self.name
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    palettes: Vec<Palette>,
}

/// Saves palettes to a single JSON file in the data directory
#[derive(Debug, Clone)]
pub struct PaletteStore {
    dir: PathBuf,
}

impl PaletteStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STORE_FILE)
    }

    /// All saved palettes, most recently updated first.
    ///
    /// A missing store file means no palettes yet.
    pub fn list(&self) -> PersistenceResult<Vec<Palette>> {
        let mut palettes = self.read()?;
        palettes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.name.cmp(&b.name)));
        Ok(palettes)
    }

    pub fn get(&self, id: Uuid) -> PersistenceResult<Palette> {
        self.read()?
            .into_iter()
            .find(|palette| palette.id == id)
            .ok_or(PersistenceError::NotFound(id))
    }

    /// Insert or replace a palette by id
    pub fn save(&self, palette: &Palette) -> PersistenceResult<Palette> {
        palette.validate()?;
        let mut palettes = self.read()?;
        let mut saved = palette.clone();
        saved.name = saved.name.trim().to_string();

        match palettes.iter_mut().find(|existing| existing.id == palette.id) {
            Some(existing) => {
                saved.created_at = existing.created_at;
                saved.updated_at = time::timestamp_secs().max(existing.updated_at);
                *existing = saved.clone();
            }
            None => palettes.push(saved.clone()),
        }

        self.write(palettes)?;
        log::info!("Saved palette '{}' ({})", saved.name, saved.id);
        Ok(saved)
    }

    pub fn rename(&self, id: Uuid, name: &str) -> PersistenceResult<Palette> {
        let mut palette = self.get(id)?;
        palette.name = name.to_string();
        self.save(&palette)
    }

    pub fn delete(&self, id: Uuid) -> PersistenceResult<()> {
        let mut palettes = self.read()?;
        let before = palettes.len();
        palettes.retain(|palette| palette.id != id);
        if palettes.len() == before {
            return Err(PersistenceError::NotFound(id));
        }
        self.write(palettes)?;
        log::info!("Deleted palette {}", id);
        Ok(())
    }

    fn read(&self) -> PersistenceResult<Vec<Palette>> {
        let path = self.path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&path)?;
        let file: StoreFile = serde_json::from_str(&json)?;
        if file.version != STORE_VERSION {
            log::warn!(
                "Palette store {} has version {}, expected {}",
                path.display(),
                file.version,
                STORE_VERSION
            );
        }
        Ok(file.palettes)
    }

    fn write(&self, palettes: Vec<Palette>) -> PersistenceResult<()> {
        fs::create_dir_all(&self.dir)?;
        let file = StoreFile {
            version: STORE_VERSION,
            palettes,
        };
        let json = serde_json::to_string_pretty(&file)?;
        write_atomic(&self.path(), &json)?;
        Ok(())
    }
}

/// Write through a temp file so a crash never leaves a half-written store
fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSize;
    use crate::swatch::{ColorSwatch, Effect};

    fn filled_grid() -> GridCellStore {
        let mut grid = GridCellStore::new(GridSize::SMALL);
        grid.set(0, ColorSwatch::new("Ruby", "#9B111E", Effect::Sparkly).unwrap())
            .unwrap();
        grid
    }

    #[test]
    fn test_save_list_get_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = PaletteStore::new(dir.path());
        assert!(store.list().unwrap().is_empty());

        let palette = store.save(&Palette::new("  Date Night ", filled_grid())).unwrap();
        assert_eq!(palette.name, "Date Night");

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(store.get(palette.id).unwrap().grid, filled_grid());

        store.delete(palette.id).unwrap();
        assert!(store.list().unwrap().is_empty());
        assert!(matches!(store.delete(palette.id), Err(PersistenceError::NotFound(_))));
    }

    #[test]
    fn test_save_replaces_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = PaletteStore::new(dir.path());
        let palette = store.save(&Palette::new("Smoky", filled_grid())).unwrap();

        let renamed = store.rename(palette.id, "Smoky Plum").unwrap();
        assert_eq!(renamed.created_at, palette.created_at);
        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Smoky Plum");
    }

    #[test]
    fn test_rejects_invalid_palettes() {
        let dir = tempfile::tempdir().unwrap();
        let store = PaletteStore::new(dir.path());
        assert!(matches!(
            store.save(&Palette::new("   ", filled_grid())),
            Err(PersistenceError::InvalidPalette(_))
        ));
        assert!(matches!(
            store.save(&Palette::new("Empty", GridCellStore::new(GridSize::SMALL))),
            Err(PersistenceError::InvalidPalette(_))
        ));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_store_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = PaletteStore::new(dir.path());
        fs::write(store.path(), "{ nope").unwrap();
        assert!(matches!(store.list(), Err(PersistenceError::SerializationError(_))));
    }
}
