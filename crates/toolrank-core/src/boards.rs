//! Board registry: display metadata for the eight rank dimensions.
//!
//! Lives in `config/boards.yaml` so labels and icons can change without a
//! rebuild; the set of keys is fixed by [`RankType`] and validated here.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::RankType;
use crate::ConfigError;

/// One board's display metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardDef {
    pub key: RankType,
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BoardsFile {
    pub boards: Vec<BoardDef>,
}

/// Load and validate the board registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_boards(path: &Path) -> Result<BoardsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BoardsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let boards_file: BoardsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::BoardsFileParse)?;

    validate_boards(&boards_file)?;

    Ok(boards_file)
}

fn validate_boards(boards_file: &BoardsFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for board in &boards_file.boards {
        if board.label.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "board '{}' has an empty label",
                board.key
            )));
        }

        if !seen.insert(board.key) {
            return Err(ConfigError::Validation(format!(
                "duplicate board key: '{}'",
                board.key
            )));
        }
    }

    for rank_type in RankType::ALL {
        if !seen.contains(&rank_type) {
            return Err(ConfigError::Validation(format!(
                "board registry is missing the '{rank_type}' dimension"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_registry() -> BoardsFile {
        BoardsFile {
            boards: RankType::ALL
                .into_iter()
                .map(|key| BoardDef {
                    key,
                    label: format!("{key} board"),
                    icon: None,
                })
                .collect(),
        }
    }

    #[test]
    fn validate_accepts_full_registry() {
        assert!(validate_boards(&full_registry()).is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_key() {
        let mut file = full_registry();
        file.boards.push(BoardDef {
            key: RankType::Trending,
            label: "Trending again".to_string(),
            icon: None,
        });
        let err = validate_boards(&file).unwrap_err();
        assert!(err.to_string().contains("duplicate board key"));
    }

    #[test]
    fn validate_rejects_missing_dimension() {
        let mut file = full_registry();
        file.boards.retain(|b| b.key != RankType::Uniqueness);
        let err = validate_boards(&file).unwrap_err();
        assert!(err.to_string().contains("uniqueness"));
    }

    #[test]
    fn validate_rejects_empty_label() {
        let mut file = full_registry();
        file.boards[0].label = "  ".to_string();
        let err = validate_boards(&file).unwrap_err();
        assert!(err.to_string().contains("empty label"));
    }

    #[test]
    fn load_boards_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("boards.yaml");
        assert!(
            path.exists(),
            "boards.yaml missing at {path:?} — required for this test"
        );
        let result = load_boards(&path);
        assert!(result.is_ok(), "failed to load boards.yaml: {result:?}");
        assert_eq!(result.unwrap().boards.len(), RankType::ALL.len());
    }
}
