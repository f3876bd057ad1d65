//! View-state persistence: JSON save/load across restarts.
//!
//! Only the view is persisted. Records are regenerated on every start.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use tickerboard_core::{SectorFilter, SortSpec};

use crate::app::{AppState, Overlay, Panel};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub sort: SortSpec,
    pub sector: SectorFilter,
    pub search: String,
    pub active_panel: Panel,
    pub welcome_dismissed: bool,
    pub paused: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            sort: SortSpec::default(),
            sector: SectorFilter::All,
            search: String::new(),
            active_panel: Panel::Grid,
            welcome_dismissed: false,
            paused: false,
        }
    }
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring corrupt state file");
            PersistedState::default()
        }),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    debug!(path = %path.display(), "view state saved");
    Ok(())
}

pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        sort: app.board.sort_spec(),
        sector: app.board.sector(),
        search: app.board.search().to_string(),
        active_panel: app.active_panel,
        welcome_dismissed: app.overlay != Overlay::Welcome,
        paused: !app.is_ticking(),
    }
}

/// Apply persisted state to AppState. A persisted sector that no longer
/// appears on the board falls back to `All`.
///
/// Returns whether ticking should start.
pub fn apply(app: &mut AppState, state: PersistedState) -> bool {
    app.board.set_sort(state.sort);
    let sector = match state.sector {
        SectorFilter::Only(s) if !app.board.sectors_present().contains(&s) => SectorFilter::All,
        other => other,
    };
    app.board.set_sector(sector);
    app.board.set_search(&state.search);
    app.active_panel = state.active_panel;
    if !state.welcome_dismissed {
        app.overlay = Overlay::Welcome;
    }
    app.clamp_cursor();
    !state.paused
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    use tickerboard_core::domain::{Sector, Security};
    use tickerboard_core::{Board, SortDirection, SortField, StockRecord};

    fn app() -> AppState {
        let records = vec![
            StockRecord::flat(&Security::new("AAPL", "Apple Inc.", Sector::Technology), 10.0, 3),
            StockRecord::flat(&Security::new("XOM", "Exxon", Sector::Energy), 20.0, 3),
        ];
        AppState::new(
            Board::with_records(records),
            Duration::from_secs(60),
            PathBuf::from("."),
            std::env::temp_dir(),
        )
    }

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let state = PersistedState {
            sort: SortSpec::new(SortField::Price, SortDirection::Descending),
            sector: SectorFilter::Only(Sector::Energy),
            search: "ex".into(),
            active_panel: Panel::Heatmap,
            welcome_dismissed: true,
            paused: true,
        };

        save(&path, &state).unwrap();
        let loaded = load(&path);

        assert_eq!(loaded.sort, state.sort);
        assert_eq!(loaded.sector, SectorFilter::Only(Sector::Energy));
        assert_eq!(loaded.search, "ex");
        assert_eq!(loaded.active_panel, Panel::Heatmap);
        assert!(loaded.welcome_dismissed);
        assert!(loaded.paused);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = load(Path::new("/nonexistent/path/state.json"));
        assert_eq!(loaded.sort, SortSpec::default());
        assert!(!loaded.welcome_dismissed);
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not valid json {{{").unwrap();

        let loaded = load(&path);
        assert_eq!(loaded.sector, SectorFilter::All);
        assert!(loaded.search.is_empty());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{ "search": "app" }"#).unwrap();

        let loaded = load(&path);
        assert_eq!(loaded.search, "app");
        assert_eq!(loaded.active_panel, Panel::Grid);
    }

    #[test]
    fn apply_then_extract() {
        let mut app = app();
        let resume = apply(
            &mut app,
            PersistedState {
                sector: SectorFilter::Only(Sector::Energy),
                welcome_dismissed: true,
                ..PersistedState::default()
            },
        );
        assert!(resume);
        assert_eq!(app.view_len(), 1);
        assert_eq!(app.overlay, Overlay::None);

        let out = extract(&app);
        assert_eq!(out.sector, SectorFilter::Only(Sector::Energy));
        assert!(out.welcome_dismissed);
        assert!(out.paused);
    }

    #[test]
    fn stale_sector_falls_back_to_all() {
        let mut app = app();
        apply(
            &mut app,
            PersistedState {
                sector: SectorFilter::Only(Sector::Healthcare),
                ..PersistedState::default()
            },
        );
        assert_eq!(app.board.sector(), SectorFilter::All);
        assert_eq!(app.overlay, Overlay::Welcome);
    }
}
