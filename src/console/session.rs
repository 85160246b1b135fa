use super::backend::{BackendDescriptor, BackendRegistry};
use super::error::ConsoleError;
use super::message::{Message, Role};
use super::service;
use super::transcript::Transcript;

/// The user message and the assistant response produced by one submission,
/// returned so the presentation layer can render incrementally without
/// re-scanning the transcript.
#[derive(Debug)]
pub(crate) struct Exchange {
    pub(crate) user: Message,
    pub(crate) response: Message,
}

/// What `submit` does when a submission is already in flight. Never queued:
/// queuing would need a reordering buffer to keep sequence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BusyPolicy {
    /// Fail with `SessionBusy`.
    Reject,
    /// Drop the submission silently, like a blank one.
    #[allow(dead_code)]
    Ignore,
}

/// Binds one transcript to one selected backend and orchestrates submission.
/// Single-threaded by design; the in-flight flag is the gate an async backend
/// would rely on to keep responses in submission order.
pub(crate) struct ConsoleSession {
    transcript: Transcript,
    registry: BackendRegistry,
    busy_policy: BusyPolicy,
    in_flight: bool,
}

impl ConsoleSession {
    pub(crate) fn new() -> Self {
        Self::with_busy_policy(BusyPolicy::Reject)
    }

    pub(crate) fn with_busy_policy(busy_policy: BusyPolicy) -> Self {
        Self {
            transcript: Transcript::new(),
            registry: BackendRegistry::new(),
            busy_policy,
            in_flight: false,
        }
    }

    /// The only mutating entry point for prompt submission. Blank input is a
    /// normal UI event (accidental Enter) and appends nothing; otherwise the
    /// user message and the generated response are appended as a pair.
    pub(crate) fn submit(&mut self, prompt: &str) -> Result<Option<Exchange>, ConsoleError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Ok(None);
        }
        if self.in_flight {
            return match self.busy_policy {
                BusyPolicy::Reject => Err(ConsoleError::SessionBusy),
                BusyPolicy::Ignore => Ok(None),
            };
        }

        self.in_flight = true;
        let result = self.run_exchange(prompt);
        self.in_flight = false;
        result.map(Some)
    }

    fn run_exchange(&mut self, prompt: &str) -> Result<Exchange, ConsoleError> {
        let backend = self.registry.current();
        let user = self.transcript.append(Role::User, prompt, None)?.clone();
        match service::generate(prompt, backend) {
            Ok(reply) => {
                let response = self
                    .transcript
                    .append(Role::Assistant, &reply.text, Some(reply.backend))?
                    .clone();
                Ok(Exchange { user, response })
            }
            Err(err) => {
                // The accepted user message stays; the failure becomes an
                // inline system message instead of tearing the session down.
                let _ = self.transcript.append(Role::System, &err.to_string(), None);
                Err(err)
            }
        }
    }

    /// Inline feedback from the presentation layer (command output, rejected
    /// operations) recorded as a system message.
    pub(crate) fn push_system_note(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.transcript.append(Role::System, text, None).map(|_| ())
    }

    pub(crate) fn set_backend(&mut self, raw: &str) -> Result<BackendDescriptor, ConsoleError> {
        self.registry.select(raw)
    }

    pub(crate) fn backend(&self) -> BackendDescriptor {
        self.registry.current()
    }

    pub(crate) fn backends(&self) -> &[BackendDescriptor] {
        self.registry.list()
    }

    pub(crate) fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub(crate) fn clear_transcript(&mut self) {
        self.transcript.clear();
    }

    #[cfg(test)]
    pub(crate) fn force_in_flight(&mut self, in_flight: bool) {
        self.in_flight = in_flight;
    }
}
