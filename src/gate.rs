//! Session-gated access to protected views.
//!
//! The gate starts in [`AccessState::Loading`] and only leaves it once the
//! initial probe or a session-change event has arrived. After that every new
//! signal is applied as it comes in; the last one received wins.

use std::sync::{Arc, Mutex, MutexGuard};

use futures::StreamExt;
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    auth::{Session, SessionStore, Unsubscribe},
    navigation::{LOGIN_PATH, Navigator},
};

pub const VERIFYING_MESSAGE: &str = "Verificando credenciales…";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    Loading,
    Authenticated,
    Unauthenticated,
}

impl AccessState {
    fn from_session(session: &Option<Session>) -> Self {
        match session {
            Some(_) => AccessState::Authenticated,
            None => AccessState::Unauthenticated,
        }
    }
}

/// What the gate lets through for the current state.
#[derive(Debug, PartialEq)]
pub enum GateView<T> {
    /// Neutral placeholder; neither the protected view nor the login screen.
    Verifying(&'static str),
    /// Nothing is shown; the login redirect has been issued.
    Redirecting,
    Content(T),
}

struct GateCore {
    mounted: bool,
    state: watch::Sender<AccessState>,
    navigator: Arc<dyn Navigator>,
}

impl GateCore {
    fn apply(&mut self, next: AccessState, source: &str) {
        if !self.mounted {
            return;
        }

        let prev = self.state.send_replace(next);
        if prev != next {
            tracing::debug!("Access {:?} -> {:?} ({})", prev, next, source);
        }
        if next == AccessState::Unauthenticated && prev != AccessState::Unauthenticated {
            self.navigator.replace(LOGIN_PATH);
        }
    }
}

fn lock(core: &Mutex<GateCore>) -> MutexGuard<'_, GateCore> {
    core.lock().unwrap_or_else(|e| e.into_inner())
}

pub struct AccessGate {
    core: Arc<Mutex<GateCore>>,
    state: watch::Receiver<AccessState>,
    unsubscribe: Unsubscribe,
    task: JoinHandle<()>,
}

impl AccessGate {
    /// Subscribes to session changes, probes the current session and starts
    /// tracking. Must be called from within a tokio runtime.
    pub fn mount(store: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        let (tx, rx) = watch::channel(AccessState::Loading);
        let core = Arc::new(Mutex::new(GateCore {
            mounted: true,
            state: tx,
            navigator,
        }));

        // Subscribe before probing so no change between the two is missed.
        let (mut events, unsubscribe) = store.on_session_change().into_parts();
        let task_core = core.clone();

        let task = tokio::spawn(async move {
            let mut probe = store.get_current_session();
            let mut probe_pending = true;
            let mut events_open = true;

            while probe_pending || events_open {
                tokio::select! {
                    // Session check first: an event ready at the same poll is newer
                    // than its answer, since the subscription predates the check.
                    biased;
                    result = &mut probe, if probe_pending => {
                        probe_pending = false;
                        let next = match result {
                            Ok(session) => AccessState::from_session(&session),
                            Err(e) => {
                                tracing::warn!("Session probe failed, denying access: {}", e);
                                AccessState::Unauthenticated
                            }
                        };
                        lock(&task_core).apply(next, "probe");
                    }
                    event = events.next(), if events_open => match event {
                        Some(session) => {
                            lock(&task_core).apply(AccessState::from_session(&session), "session change");
                        }
                        None => events_open = false,
                    },
                }
            }
        });

        Self {
            core,
            state: rx,
            unsubscribe,
            task,
        }
    }

    pub fn state(&self) -> AccessState {
        *self.state.borrow()
    }

    pub fn watch(&self) -> watch::Receiver<AccessState> {
        self.state.clone()
    }

    /// Waits for the first non-loading state.
    pub async fn settled(&self) -> AccessState {
        let mut rx = self.state.clone();
        rx.wait_for(|s| *s != AccessState::Loading)
            .await
            .map(|s| *s)
            .unwrap_or(AccessState::Unauthenticated)
    }

    pub fn render<T>(&self, child: impl FnOnce() -> T) -> GateView<T> {
        match self.state() {
            AccessState::Loading => GateView::Verifying(VERIFYING_MESSAGE),
            AccessState::Unauthenticated => GateView::Redirecting,
            AccessState::Authenticated => GateView::Content(child()),
        }
    }

    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        {
            let mut core = lock(&self.core);
            if !core.mounted {
                return;
            }
            core.mounted = false;
        }
        self.unsubscribe.unsubscribe();
        self.task.abort();
        tracing::debug!("Access gate unmounted");
    }
}

impl Drop for AccessGate {
    fn drop(&mut self) {
        self.teardown();
    }
}
