use super::backend::BackendId;
use super::error::ConsoleError;
use super::message::{Message, Role};

/// Append-only ordered store of messages for one session. Owns sequencing:
/// numbers start at 1, increase by one per append, and are never reused
/// while the store lives. `clear` restarts the counter.
pub(crate) struct Transcript {
    messages: Vec<Message>,
    next_sequence: u64,
}

impl Transcript {
    pub(crate) fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_sequence: 1,
        }
    }

    /// Stores a message with the next sequence number. Leading/trailing
    /// whitespace is stripped; text that strips to nothing is rejected and
    /// never becomes a message.
    pub(crate) fn append(
        &mut self,
        role: Role,
        text: &str,
        backend: Option<BackendId>,
    ) -> Result<&Message, ConsoleError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ConsoleError::EmptyMessage);
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let idx = self.messages.len();
        self.messages
            .push(Message::new(sequence, role, trimmed.to_string(), backend));
        Ok(&self.messages[idx])
    }

    /// Sequence-ordered view. Restartable; a fresh call reflects appends made
    /// since the previous read.
    pub(crate) fn all(&self) -> impl Iterator<Item = &Message> + '_ {
        self.messages.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.messages.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.messages.clear();
        self.next_sequence = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_assigns_increasing_sequences_from_one() {
        let mut transcript = Transcript::new();
        let first = transcript
            .append(Role::User, "hello", None)
            .expect("append first")
            .sequence;
        let second = transcript
            .append(Role::Assistant, "hi", Some(BackendId::Mock))
            .expect("append second")
            .sequence;

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn append_strips_whitespace_before_storage() {
        let mut transcript = Transcript::new();
        let stored = transcript
            .append(Role::User, "  padded  \n", None)
            .expect("append");

        assert_eq!(stored.text, "padded");
    }

    #[test]
    fn append_rejects_text_that_strips_to_empty() {
        let mut transcript = Transcript::new();
        let err = transcript.append(Role::User, "   \n\t ", None).unwrap_err();

        assert_eq!(err, ConsoleError::EmptyMessage);
        assert!(transcript.is_empty());
    }

    #[test]
    fn backend_id_is_dropped_for_non_assistant_roles() {
        let mut transcript = Transcript::new();
        let user = transcript
            .append(Role::User, "question", Some(BackendId::Mock))
            .expect("append user");
        assert_eq!(user.backend, None);

        let system = transcript
            .append(Role::System, "note", Some(BackendId::ModelA))
            .expect("append system");
        assert_eq!(system.backend, None);

        let assistant = transcript
            .append(Role::Assistant, "answer", Some(BackendId::Mock))
            .expect("append assistant");
        assert_eq!(assistant.backend, Some(BackendId::Mock));
    }

    #[test]
    fn all_reflects_appends_after_a_previous_read() {
        let mut transcript = Transcript::new();
        transcript.append(Role::User, "one", None).expect("append");
        assert_eq!(transcript.all().count(), 1);

        transcript.append(Role::User, "two", None).expect("append");
        let texts: Vec<&str> = transcript.all().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["one", "two"]);
    }

    #[test]
    fn clear_resets_the_sequence_counter() {
        let mut transcript = Transcript::new();
        transcript.append(Role::User, "one", None).expect("append");
        transcript.append(Role::User, "two", None).expect("append");
        transcript.clear();

        assert!(transcript.is_empty());
        let next = transcript
            .append(Role::User, "fresh", None)
            .expect("append after clear")
            .sequence;
        assert_eq!(next, 1);
    }
}
