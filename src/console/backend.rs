use serde::{Deserialize, Serialize};

use super::error::ConsoleError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum BackendId {
    Mock,
    ModelA,
    ModelB,
}

impl BackendId {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            BackendId::Mock => "mock",
            BackendId::ModelA => "model-a",
            BackendId::ModelB => "model-b",
        }
    }

    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "mock" => Some(BackendId::Mock),
            "model-a" => Some(BackendId::ModelA),
            "model-b" => Some(BackendId::ModelB),
            _ => None,
        }
    }

    pub(crate) fn all() -> [BackendId; 3] {
        [BackendId::Mock, BackendId::ModelA, BackendId::ModelB]
    }
}

/// Descriptor for one selectable response-generation strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BackendDescriptor {
    pub(crate) id: BackendId,
    pub(crate) display_name: &'static str,
    pub(crate) is_mock: bool,
}

/// Enumerates the available backends and tracks the selected one. The mock
/// backend is always registered and is the default selection, so `current`
/// can never dangle.
pub(crate) struct BackendRegistry {
    backends: Vec<BackendDescriptor>,
    selected: BackendId,
}

impl BackendRegistry {
    pub(crate) fn new() -> Self {
        // Declaration order is the presentation order; mock stays first.
        let backends = vec![
            BackendDescriptor {
                id: BackendId::Mock,
                display_name: "Mock",
                is_mock: true,
            },
            BackendDescriptor {
                id: BackendId::ModelA,
                display_name: "Model A",
                is_mock: false,
            },
            BackendDescriptor {
                id: BackendId::ModelB,
                display_name: "Model B",
                is_mock: false,
            },
        ];
        Self {
            backends,
            selected: BackendId::Mock,
        }
    }

    pub(crate) fn list(&self) -> &[BackendDescriptor] {
        &self.backends
    }

    /// Sets the selection from a raw id string. An unknown id leaves the
    /// selection untouched.
    pub(crate) fn select(&mut self, raw: &str) -> Result<BackendDescriptor, ConsoleError> {
        let id = BackendId::parse(raw)
            .ok_or_else(|| ConsoleError::UnknownBackend(raw.trim().to_string()))?;
        let descriptor = self
            .descriptor(id)
            .ok_or_else(|| ConsoleError::UnknownBackend(raw.trim().to_string()))?;
        self.selected = id;
        Ok(descriptor)
    }

    pub(crate) fn current(&self) -> BackendDescriptor {
        self.descriptor(self.selected)
            .unwrap_or_else(|| self.backends[0])
    }

    pub(crate) fn descriptor(&self, id: BackendId) -> Option<BackendDescriptor> {
        self.backends.iter().copied().find(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_is_in_declaration_order_with_mock_first() {
        let registry = BackendRegistry::new();
        let ids: Vec<BackendId> = registry.list().iter().map(|b| b.id).collect();
        assert_eq!(ids, BackendId::all());
        assert!(registry.list()[0].is_mock);
    }

    #[test]
    fn selection_defaults_to_mock() {
        let registry = BackendRegistry::new();
        assert_eq!(registry.current().id, BackendId::Mock);
    }

    #[test]
    fn select_switches_the_current_descriptor() {
        let mut registry = BackendRegistry::new();
        let selected = registry.select("model-a").expect("select model-a");
        assert_eq!(selected.id, BackendId::ModelA);
        assert_eq!(registry.current().display_name, "Model A");
    }

    #[test]
    fn select_unknown_id_fails_and_keeps_the_selection() {
        let mut registry = BackendRegistry::new();
        let err = registry.select("gpt-12").unwrap_err();
        assert_eq!(err, ConsoleError::UnknownBackend("gpt-12".to_string()));
        assert_eq!(registry.current().id, BackendId::Mock);
    }

    #[test]
    fn select_is_case_and_whitespace_tolerant() {
        let mut registry = BackendRegistry::new();
        let selected = registry.select("  Model-B ").expect("select model-b");
        assert_eq!(selected.id, BackendId::ModelB);
    }
}
