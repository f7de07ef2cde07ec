//! Path utilities for determining data storage locations.
//!
//! The board database lives in `~/.taskboard/` by default. Callers that
//! want a different location construct their storage backend with an
//! explicit path instead.

use std::path::PathBuf;

/// The base directory name for taskboard data.
const DATA_DIR_NAME: &str = ".taskboard";

/// The board database filename.
pub const DATABASE_FILENAME: &str = "board.sqlite3";

/// Get the base data directory for taskboard.
///
/// Returns `~/.taskboard/` or `None` if the home directory cannot be
/// determined.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DATA_DIR_NAME))
}

/// Get the default board database path.
///
/// Returns `~/.taskboard/board.sqlite3` or `None` if the home directory
/// cannot be determined.
#[must_use]
pub fn board_db_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(DATABASE_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_returns_home_based_path() {
        if let Some(home) = dirs::home_dir() {
            let data = data_dir().unwrap();
            assert_eq!(data, home.join(".taskboard"));
        }
    }

    #[test]
    fn test_board_db_path_ends_with_filename() {
        if let Some(path) = board_db_path() {
            assert!(path.to_string_lossy().ends_with(DATABASE_FILENAME));
        }
    }
}
