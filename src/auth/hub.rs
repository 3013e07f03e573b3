use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, MutexGuard, Weak,
        atomic::{AtomicBool, Ordering},
    },
};

use chrono::{DateTime, Utc};
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::sleep;
use uuid::Uuid;

use crate::auth::Session;

type Listeners = HashMap<Uuid, UnboundedSender<Option<Session>>>;

#[derive(Default)]
struct HubInner {
    current: Option<Session>,
    // Bumped on every publish so a pending expiry timer can tell it went stale.
    generation: u64,
    listeners: Listeners,
}

/// Current session plus the listeners waiting for it to change.
#[derive(Clone, Default)]
pub struct SessionHub {
    inner: Arc<Mutex<HubInner>>,
}

/// Releases one listener registration. Idempotent; also runs on drop.
#[derive(Debug)]
pub struct Unsubscribe {
    id: Uuid,
    hub: Weak<Mutex<HubInner>>,
    done: AtomicBool,
}

impl Unsubscribe {
    pub fn unsubscribe(&self) {
        if self.done.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(inner) = self.hub.upgrade() {
            let mut inner = inner.lock().unwrap_or_else(|e| e.into_inner());
            inner.listeners.remove(&self.id);
            tracing::debug!("Session listener {} removed", self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        !self.done.load(Ordering::SeqCst)
    }
}

impl Drop for Unsubscribe {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

pub struct SessionSubscription {
    pub events: UnboundedReceiver<Option<Session>>,
    pub handle: Unsubscribe,
}

impl SessionSubscription {
    pub fn into_parts(self) -> (UnboundedReceiver<Option<Session>>, Unsubscribe) {
        (self.events, self.handle)
    }
}

impl SessionHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HubInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn current(&self) -> Option<Session> {
        self.lock().current.clone()
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    pub fn subscribe(&self) -> SessionSubscription {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded();
        self.lock().listeners.insert(id, tx);
        tracing::debug!("Session listener {} registered", id);

        SessionSubscription {
            events: rx,
            handle: Unsubscribe {
                id,
                hub: Arc::downgrade(&self.inner),
                done: AtomicBool::new(false),
            },
        }
    }

    /// Replaces the current session and notifies every listener.
    pub fn publish(&self, session: Option<Session>) {
        let generation = {
            let mut inner = self.lock();
            Self::store(&mut inner, session.clone())
        };

        if let Some(expires_at) = session.and_then(|s| s.expires_at) {
            self.schedule_expiry(generation, expires_at);
        }
    }

    fn store(inner: &mut HubInner, session: Option<Session>) -> u64 {
        inner.current = session.clone();
        inner.generation += 1;
        inner
            .listeners
            .retain(|_, tx| tx.unbounded_send(session.clone()).is_ok());
        inner.generation
    }

    fn schedule_expiry(&self, generation: u64, expires_at: DateTime<Utc>) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No runtime available, session expiry will not be watched");
            return;
        };

        let delay = (expires_at - Utc::now()).to_std().unwrap_or_default();
        let hub = Arc::downgrade(&self.inner);

        runtime.spawn(async move {
            sleep(delay).await;

            let Some(inner) = hub.upgrade() else {
                return;
            };
            let mut inner = inner.lock().unwrap_or_else(|e| e.into_inner());
            if inner.generation == generation && inner.current.is_some() {
                tracing::info!("Session token expired");
                Self::store(&mut inner, None);
            }
        });
    }
}
