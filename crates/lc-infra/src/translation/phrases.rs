use std::path::Path;

use lc_core::translation::PhraseTable;
use tracing::{info, warn};

/// Built-in phrase table, extended from `path` when given.
///
/// A missing or malformed extension file is logged and ignored.
pub async fn load_phrase_table(path: Option<&Path>) -> PhraseTable {
    let mut table = PhraseTable::builtin();
    let Some(path) = path else {
        return table;
    };

    match tokio::fs::read_to_string(path).await {
        Ok(json) => match table.extend_from_json(&json) {
            Ok(added) => info!(path = %path.display(), added, "loaded phrase table entries"),
            Err(e) => warn!(path = %path.display(), error = %e, "ignoring malformed phrase table"),
        },
        Err(e) => warn!(path = %path.display(), error = %e, "phrase table file unreadable"),
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn extension_file_is_merged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("phrases.json");
        std::fs::write(
            &path,
            r#"[{"src":"en","dest":"vi","phrase":"good evening","translation":"chào buổi tối"}]"#,
        )
        .unwrap();

        let table = load_phrase_table(Some(&path)).await;

        assert_eq!(table.lookup("en", "vi", "good evening"), Some("chào buổi tối"));
        assert_eq!(table.lookup("en", "vi", "hello"), Some("xin chào"));
    }

    #[tokio::test]
    async fn missing_file_keeps_builtin_set() {
        let dir = TempDir::new().unwrap();
        let table = load_phrase_table(Some(&dir.path().join("absent.json"))).await;
        assert_eq!(table.len(), PhraseTable::builtin().len());
    }
}
