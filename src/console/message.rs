use super::backend::BackendId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// One immutable transcript entry. Constructed only by the transcript, which
/// assigns the sequence number; the backend id is carried by assistant
/// messages alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Message {
    pub(crate) sequence: u64,
    pub(crate) role: Role,
    pub(crate) text: String,
    pub(crate) backend: Option<BackendId>,
}

impl Message {
    pub(super) fn new(sequence: u64, role: Role, text: String, backend: Option<BackendId>) -> Self {
        let backend = match role {
            Role::Assistant => backend,
            Role::User | Role::System => None,
        };
        Self {
            sequence,
            role,
            text,
            backend,
        }
    }
}
