//! File loaders for maps, scenarios and configuration.

use std::path::Path;

use crate::oracle::GridMap;
use crate::scenario::Scenario;

pub use crate::config::ConfigLoader;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Reads an ASCII layout, skipping empty lines and `;` comments.
///
/// Trailing spaces are kept: a space is the void glyph.
fn read_rows(path: &Path) -> LoadResult<Vec<String>> {
    let content = read_file(path)?;
    Ok(content
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with(';'))
        .map(str::to_owned)
        .collect())
}

/// Loader for ASCII maps, one text line per row.
///
/// See [`GridMap::from_rows`] for the glyphs.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<GridMap> {
        let rows = read_rows(path)?;
        let map = GridMap::from_rows(&rows)
            .map_err(|e| anyhow::anyhow!("Failed to parse map {}: {}", path.display(), e))?;
        Ok(map)
    }
}

/// Loader for ASCII scenarios with unit glyphs.
///
/// See [`Scenario`] for the unit glyphs.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let rows = read_rows(path)?;
        let scenario = Scenario::from_rows(&rows)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario {}: {}", path.display(), e))?;
        Ok(scenario)
    }
}
