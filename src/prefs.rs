use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::console::BackendId;
use crate::panel::{default_theme, ThemePreset};

const MAX_PERSISTED_HISTORY: usize = 200;

/// User preferences that survive restarts: the selected backend, the theme,
/// and the composer history. Transcript content is never part of this.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct PrefsSnapshot {
    pub(crate) backend: BackendId,
    #[serde(default = "default_theme")]
    pub(crate) theme: ThemePreset,
    #[serde(default)]
    pub(crate) history: Vec<String>,
}

fn prefs_file_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".stormy-console").join("prefs.json")
    } else {
        PathBuf::from(".stormy-console").join("prefs.json")
    }
}

/// Missing or unreadable snapshots (including ones naming a backend this
/// build no longer knows) are treated as "no preferences".
pub(crate) fn restore() -> Option<PrefsSnapshot> {
    let raw = fs::read_to_string(prefs_file_path()).ok()?;
    serde_json::from_str::<PrefsSnapshot>(&raw).ok()
}

/// Best-effort write; a failure never disturbs the session.
pub(crate) fn persist(snapshot: &PrefsSnapshot) {
    let path = prefs_file_path();
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let history = if snapshot.history.len() > MAX_PERSISTED_HISTORY {
        snapshot.history[snapshot.history.len() - MAX_PERSISTED_HISTORY..].to_vec()
    } else {
        snapshot.history.clone()
    };
    let capped = PrefsSnapshot {
        backend: snapshot.backend,
        theme: snapshot.theme,
        history,
    };

    let Ok(serialized) = serde_json::to_string_pretty(&capped) else {
        return;
    };
    let _ = fs::write(path, serialized);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_with_unknown_backend_fails_to_parse() {
        let raw = r#"{"backend":"model-z","theme":"graphite","history":[]}"#;
        assert!(serde_json::from_str::<PrefsSnapshot>(raw).is_err());
    }

    #[test]
    fn snapshot_defaults_missing_fields() {
        let raw = r#"{"backend":"model-a"}"#;
        let snapshot: PrefsSnapshot = serde_json::from_str(raw).expect("parse");
        assert_eq!(snapshot.backend, BackendId::ModelA);
        assert_eq!(snapshot.theme, default_theme());
        assert!(snapshot.history.is_empty());
    }

    #[test]
    fn backend_ids_serialize_as_kebab_case() {
        let snapshot = PrefsSnapshot {
            backend: BackendId::ModelB,
            theme: ThemePreset::Ember,
            history: vec!["hello".to_string()],
        };
        let raw = serde_json::to_string(&snapshot).expect("serialize");
        assert!(raw.contains("\"model-b\""));
        assert!(raw.contains("\"ember\""));
    }
}
