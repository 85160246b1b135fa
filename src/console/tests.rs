use super::*;

use crate::host::{HostShell, WindowId};

/// Host double with a configurable main window and call counters.
struct FakeHost {
    main: Option<WindowId>,
    attached: Vec<WindowId>,
    raised: Vec<WindowId>,
    detached: Vec<WindowId>,
}

impl FakeHost {
    fn new() -> Self {
        Self {
            main: Some(WindowId(7)),
            attached: Vec::new(),
            raised: Vec::new(),
            detached: Vec::new(),
        }
    }

    fn without_window() -> Self {
        Self {
            main: None,
            ..Self::new()
        }
    }
}

impl HostShell for FakeHost {
    fn main_window(&self) -> Option<WindowId> {
        self.main
    }

    fn attach_panel(&mut self, window: WindowId) {
        self.attached.push(window);
    }

    fn raise_panel(&mut self, window: WindowId) {
        self.raised.push(window);
    }

    fn detach_panel(&mut self, window: WindowId) {
        self.detached.push(window);
    }
}

#[test]
fn submit_appends_user_then_assistant_with_increasing_sequences() {
    let mut session = ConsoleSession::new();
    let exchange = session
        .submit("what is the wind load?")
        .expect("submit")
        .expect("non-blank");

    assert_eq!(exchange.user.role, Role::User);
    assert_eq!(exchange.response.role, Role::Assistant);
    assert!(exchange.user.sequence < exchange.response.sequence);
    assert_eq!(exchange.response.backend, Some(session.backend().id));
    assert_eq!(session.transcript().len(), 2);
}

#[test]
fn mock_exchange_uses_the_fixed_template() {
    let mut session = ConsoleSession::new();
    let exchange = session.submit("Hello").expect("submit").expect("non-blank");

    assert_eq!(
        exchange.response.text,
        "[Mock] I received your prompt: 'Hello'. This is a mock response."
    );
}

#[test]
fn whitespace_only_submit_appends_nothing() {
    let mut session = ConsoleSession::new();
    let result = session.submit("   \t ").expect("submit");

    assert!(result.is_none());
    assert!(session.transcript().is_empty());
}

#[test]
fn submit_trims_the_prompt_before_storing_and_echoing() {
    let mut session = ConsoleSession::new();
    let exchange = session
        .submit("  spaced out  ")
        .expect("submit")
        .expect("non-blank");

    assert_eq!(exchange.user.text, "spaced out");
    assert!(exchange.response.text.contains("'spaced out'"));
}

#[test]
fn sequences_alternate_user_assistant_across_submissions() {
    let mut session = ConsoleSession::new();
    for i in 0..4 {
        session
            .submit(&format!("prompt {i}"))
            .expect("submit")
            .expect("non-blank");
    }

    let messages: Vec<_> = session.transcript().all().collect();
    assert_eq!(messages.len(), 8);
    for (idx, message) in messages.iter().enumerate() {
        assert_eq!(message.sequence, idx as u64 + 1);
        let expected = if idx % 2 == 0 {
            Role::User
        } else {
            Role::Assistant
        };
        assert_eq!(message.role, expected, "message {idx}");
    }
}

#[test]
fn set_backend_changes_the_next_response_attribution() {
    let mut session = ConsoleSession::new();
    session.set_backend("model-a").expect("select model-a");

    let exchange = session
        .submit("route me")
        .expect("submit")
        .expect("non-blank");
    assert_eq!(exchange.response.backend, Some(BackendId::ModelA));
    assert!(exchange.response.text.starts_with("[Model A]"));
}

#[test]
fn unknown_backend_selection_is_rejected_and_leaves_current_unchanged() {
    let mut session = ConsoleSession::new();
    let err = session.set_backend("unknown-id").unwrap_err();

    assert_eq!(err, ConsoleError::UnknownBackend("unknown-id".to_string()));
    assert_eq!(session.backend().id.as_str(), "mock");
}

#[test]
fn busy_session_rejects_a_second_submission_without_touching_the_transcript() {
    let mut session = ConsoleSession::new();
    session.submit("first").expect("submit").expect("non-blank");
    let len_before = session.transcript().len();

    session.force_in_flight(true);
    let err = session.submit("second").unwrap_err();
    assert_eq!(err, ConsoleError::SessionBusy);
    assert_eq!(session.transcript().len(), len_before);

    session.force_in_flight(false);
    session.submit("third").expect("submit").expect("non-blank");
    assert_eq!(session.transcript().len(), len_before + 2);
}

#[test]
fn ignore_policy_drops_submissions_while_busy() {
    let mut session = ConsoleSession::with_busy_policy(BusyPolicy::Ignore);
    session.force_in_flight(true);

    let result = session.submit("dropped").expect("submit");
    assert!(result.is_none());
    assert!(session.transcript().is_empty());
}

#[test]
fn clear_transcript_restarts_sequencing_between_submissions() {
    let mut session = ConsoleSession::new();
    session.submit("one").expect("submit").expect("non-blank");
    session.clear_transcript();
    let exchange = session.submit("two").expect("submit").expect("non-blank");

    assert_eq!(exchange.user.sequence, 1);
    assert_eq!(exchange.response.sequence, 2);
}

#[test]
fn backend_error_kinds_render_distinctly() {
    let timeout = ConsoleError::Backend {
        backend: "model-a".to_string(),
        kind: BackendErrorKind::Timeout,
    };
    let transport = ConsoleError::Backend {
        backend: "model-a".to_string(),
        kind: BackendErrorKind::Transport,
    };

    assert!(timeout.to_string().contains("timeout"));
    assert!(transport.to_string().contains("transport"));
    assert_ne!(timeout, transport);
}

#[test]
fn activate_creates_exactly_one_session_per_window() {
    let mut host = FakeHost::new();
    let mut manager = ConsoleInstanceManager::new();

    let (window, first) = manager.activate(&mut host).expect("first activate");
    assert_eq!(first, Activation::Created);
    assert!(manager.is_present(window));
    assert_eq!(host.attached, vec![window]);

    manager
        .session_mut(window)
        .expect("session present")
        .submit("hello")
        .expect("submit")
        .expect("non-blank");
    let len_before = manager.session(window).expect("session").transcript().len();

    let (same_window, second) = manager.activate(&mut host).expect("second activate");
    assert_eq!(second, Activation::Raised);
    assert_eq!(same_window, window);
    assert_eq!(host.attached.len(), 1);
    assert_eq!(host.raised, vec![window]);
    assert_eq!(
        manager.session(window).expect("session").transcript().len(),
        len_before
    );
}

#[test]
fn activate_without_a_main_window_creates_no_state() {
    let mut host = FakeHost::without_window();
    let mut manager = ConsoleInstanceManager::new();

    let err = manager.activate(&mut host).unwrap_err();
    assert_eq!(err, ConsoleError::HostUnavailable);
    assert!(host.attached.is_empty());
    assert!(!manager.is_present(WindowId(7)));
}

#[test]
fn close_discards_the_session_and_allows_a_fresh_activation() {
    let mut host = FakeHost::new();
    let mut manager = ConsoleInstanceManager::new();

    let (window, _) = manager.activate(&mut host).expect("activate");
    manager
        .session_mut(window)
        .expect("session")
        .submit("remember me")
        .expect("submit")
        .expect("non-blank");

    assert!(manager.close(&mut host, window));
    assert!(!manager.is_present(window));
    assert_eq!(host.detached, vec![window]);
    assert!(!manager.close(&mut host, window));

    let (window, activation) = manager.activate(&mut host).expect("re-activate");
    assert_eq!(activation, Activation::Created);
    assert!(manager
        .session(window)
        .expect("fresh session")
        .transcript()
        .is_empty());
}
