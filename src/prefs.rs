//! Theme preference storage and resolution.
//!
//! One durable fact survives between runs: the display mode the user last
//! chose. It lives in a small versioned JSON file under the platform config
//! directory and is cached in memory by [`PrefStore`] so the run loop never
//! re-reads disk. Resolution priority: stored value, then the terminal
//! background signal, then dark.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Current preferences file format version.
const PREFS_VERSION: u32 = 1;

/// Preferences filename within the config directory.
const PREFS_FILENAME: &str = "prefs.json";

// ============================================================================
// THEME MODE
// ============================================================================

/// Display mode. Persisted as the literal strings "light" / "dark".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    /// The wire string stored on disk.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Parse a wire string. Anything but the two literals is rejected.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    /// The other mode.
    pub fn inverted(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the initial mode: stored value wins, else the background signal,
/// else dark.
pub fn resolve_initial(stored: Option<ThemeMode>, prefers_light: bool) -> ThemeMode {
    match stored {
        Some(mode) => mode,
        None if prefers_light => ThemeMode::Light,
        None => ThemeMode::Dark,
    }
}

// ============================================================================
// FILE FORMAT
// ============================================================================

/// On-disk shape of the preferences file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PrefsFile {
    version: u32,
    theme: ThemeMode,
}

// ============================================================================
// STORE
// ============================================================================

/// Preference store: one file path, one cached value.
///
/// `open` reads the file once, `get` answers from the cache, and `set`
/// writes through immediately. The store is constructed by the caller and
/// handed to whoever needs it; nothing reads ambient state.
#[derive(Debug)]
pub struct PrefStore {
    path: PathBuf,
    cached: Option<ThemeMode>,
}

/// Default preferences path: `<config_dir>/termfolio/prefs.json`.
pub fn default_prefs_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("termfolio")
        .join(PREFS_FILENAME)
}

impl PrefStore {
    /// Open a store at `path`, loading the stored value if the file exists.
    ///
    /// A missing file means no stored preference. A present but malformed
    /// file is an error: a corrupt preference should be seen, not silently
    /// replaced.
    pub fn open(path: &Path) -> io::Result<Self> {
        let cached = match fs::read_to_string(path) {
            Ok(contents) => {
                let file: PrefsFile = serde_json::from_str(&contents).map_err(|e| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("Invalid preferences file: {}", e),
                    )
                })?;
                Some(file.theme)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };

        Ok(PrefStore {
            path: path.to_path_buf(),
            cached,
        })
    }

    /// Open the store at the default platform path.
    pub fn open_default() -> io::Result<Self> {
        PrefStore::open(&default_prefs_path())
    }

    /// The stored mode, if any.
    pub fn get(&self) -> Option<ThemeMode> {
        self.cached
    }

    /// Persist `mode`: update the cache and write the file through.
    pub fn set(&mut self, mode: ThemeMode) -> io::Result<()> {
        self.cached = Some(mode);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = PrefsFile {
            version: PREFS_VERSION,
            theme: mode,
        };
        let contents = serde_json::to_string_pretty(&file).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Failed to serialize preferences: {}", e),
            )
        })?;
        fs::write(&self.path, contents)
    }

    /// Delete the stored preference, if present.
    pub fn clear(&mut self) -> io::Result<()> {
        self.cached = None;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Where this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> PrefStore {
        PrefStore::open(&dir.path().join(PREFS_FILENAME)).unwrap()
    }

    // -- Resolution priority --

    #[test]
    fn no_stored_value_and_light_signal_resolves_light() {
        assert_eq!(resolve_initial(None, true), ThemeMode::Light);
    }

    #[test]
    fn no_stored_value_and_dark_signal_resolves_dark() {
        assert_eq!(resolve_initial(None, false), ThemeMode::Dark);
    }

    #[test]
    fn stored_value_beats_the_signal() {
        assert_eq!(resolve_initial(Some(ThemeMode::Light), false), ThemeMode::Light);
        assert_eq!(resolve_initial(Some(ThemeMode::Dark), true), ThemeMode::Dark);
    }

    // -- Mode strings --

    #[test]
    fn wire_strings_round_trip() {
        assert_eq!(ThemeMode::from_str("light"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::from_str("dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::from_str(ThemeMode::Light.as_str()), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::from_str("LIGHT"), None);
        assert_eq!(ThemeMode::from_str(""), None);
    }

    #[test]
    fn inverting_twice_is_identity() {
        assert_eq!(ThemeMode::Light.inverted().inverted(), ThemeMode::Light);
        assert_eq!(ThemeMode::Dark.inverted(), ThemeMode::Light);
    }

    // -- Store --

    #[test]
    fn missing_file_means_no_stored_value() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get(), None);
    }

    #[test]
    fn set_then_reopen_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PREFS_FILENAME);

        let mut store = PrefStore::open(&path).unwrap();
        store.set(ThemeMode::Light).unwrap();
        assert_eq!(store.get(), Some(ThemeMode::Light));

        let reopened = PrefStore::open(&path).unwrap();
        assert_eq!(reopened.get(), Some(ThemeMode::Light));
    }

    #[test]
    fn stored_string_is_the_lowercase_literal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PREFS_FILENAME);

        let mut store = PrefStore::open(&path).unwrap();
        store.set(ThemeMode::Dark).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"dark\""));
        assert!(!contents.contains("\"Dark\""));
    }

    #[test]
    fn malformed_file_is_invalid_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PREFS_FILENAME);
        std::fs::write(&path, "{not json").unwrap();

        let err = PrefStore::open(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn unknown_theme_string_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PREFS_FILENAME);
        std::fs::write(&path, r#"{"version":1,"theme":"sepia"}"#).unwrap();

        let err = PrefStore::open(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn clear_removes_the_file_and_the_cache() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PREFS_FILENAME);

        let mut store = PrefStore::open(&path).unwrap();
        store.set(ThemeMode::Light).unwrap();
        store.clear().unwrap();
        assert_eq!(store.get(), None);
        assert!(!path.exists());

        // Clearing an already-empty store is fine
        store.clear().unwrap();
    }

    #[test]
    fn toggle_twice_restores_the_persisted_string() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PREFS_FILENAME);

        let mut store = PrefStore::open(&path).unwrap();
        store.set(ThemeMode::Dark).unwrap();
        let original = std::fs::read_to_string(&path).unwrap();

        let mode = store.get().unwrap();
        store.set(mode.inverted()).unwrap();
        store.set(mode.inverted().inverted()).unwrap();

        assert_eq!(store.get(), Some(ThemeMode::Dark));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }
}
