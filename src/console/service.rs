use super::backend::{BackendDescriptor, BackendId};
use super::error::ConsoleError;

/// Generated response body plus the backend that produced it. The transcript
/// assigns the sequence number when the reply is appended.
pub(crate) struct AssistantReply {
    pub(crate) backend: BackendId,
    pub(crate) text: String,
}

/// Produces a response for a prompt on the given backend. The sole extension
/// point for real model integrations: prompt in, reply or error out. The
/// registered backends are all offline today, so this cannot fail; a
/// transport-backed backend would surface `ConsoleError::Backend` here.
pub(crate) fn generate(
    prompt: &str,
    backend: BackendDescriptor,
) -> Result<AssistantReply, ConsoleError> {
    let text = match backend.id {
        BackendId::Mock => mock_reply(prompt, backend),
        BackendId::ModelA | BackendId::ModelB => pending_reply(backend),
    };
    Ok(AssistantReply {
        backend: backend.id,
        text,
    })
}

/// Pure function of the prompt: identical input yields byte-identical output.
fn mock_reply(prompt: &str, backend: BackendDescriptor) -> String {
    format!(
        "[{}] I received your prompt: '{}'. This is a mock response.",
        backend.display_name, prompt
    )
}

fn pending_reply(backend: BackendDescriptor) -> String {
    format!(
        "[{}] The {} integration is pending. Your prompt was not processed.",
        backend.display_name,
        backend.id.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::backend::BackendRegistry;

    fn descriptor(id: BackendId) -> BackendDescriptor {
        BackendRegistry::new().descriptor(id).expect("registered")
    }

    #[test]
    fn mock_reply_echoes_the_prompt_verbatim() {
        let reply = generate("Hello", descriptor(BackendId::Mock)).expect("generate");
        assert_eq!(
            reply.text,
            "[Mock] I received your prompt: 'Hello'. This is a mock response."
        );
        assert_eq!(reply.backend, BackendId::Mock);
    }

    #[test]
    fn mock_reply_is_deterministic() {
        let mock = descriptor(BackendId::Mock);
        let first = generate("same prompt", mock).expect("first");
        let second = generate("same prompt", mock).expect("second");
        assert_eq!(first.text, second.text);
    }

    #[test]
    fn unimplemented_backends_return_a_fixed_pending_reply() {
        let reply = generate("anything", descriptor(BackendId::ModelA)).expect("generate");
        assert_eq!(reply.backend, BackendId::ModelA);
        assert!(reply.text.starts_with("[Model A]"));
        assert!(reply.text.contains("model-a integration is pending"));

        let again = generate("something else", descriptor(BackendId::ModelA)).expect("generate");
        assert_eq!(reply.text, again.text);
    }
}
