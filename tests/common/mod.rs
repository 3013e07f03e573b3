#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entre_alas_feedback::{
    auth::{Session, SessionHub, SessionStore, SessionSubscription, SessionUser},
    db::{Collection, FeedbackRepository, RecentQuery},
    errors::AppError,
    gate::{AccessGate, AccessState},
    models::{Empaque, Llegada, Rating, Sabor},
    navigation::Navigator,
};
use serde_json::{Value, json};
use tokio::sync::oneshot;
use uuid::Uuid;

pub type ProbeResult = Result<Option<Session>, AppError>;

pub fn session() -> Session {
    Session {
        access_token: "access-token".into(),
        refresh_token: Some("refresh-token".into()),
        expires_at: None,
        user: SessionUser {
            id: Uuid::new_v4(),
            email: Some("admin@entrealas.mx".into()),
        },
    }
}

pub fn rating(sabor: Sabor, llegada: Llegada, empaque: Empaque, created_at: DateTime<Utc>) -> Rating {
    Rating {
        id: Uuid::new_v4(),
        sabor,
        llegada,
        empaque,
        comentario: None,
        created_at,
    }
}

/// Session store whose initial probe is answered by the test.
pub struct ScriptedStore {
    pub hub: SessionHub,
    probe: Mutex<Option<oneshot::Receiver<ProbeResult>>>,
    pub sign_outs: AtomicUsize,
}

impl ScriptedStore {
    pub fn pending() -> (Arc<Self>, oneshot::Sender<ProbeResult>) {
        let (tx, rx) = oneshot::channel();
        let store = Arc::new(Self {
            hub: SessionHub::new(),
            probe: Mutex::new(Some(rx)),
            sign_outs: AtomicUsize::new(0),
        });
        (store, tx)
    }

    pub fn resolved(result: ProbeResult) -> Arc<Self> {
        let (store, tx) = Self::pending();
        let _ = tx.send(result);
        store
    }

    /// Probe reads whatever the hub currently holds.
    pub fn live() -> Arc<Self> {
        Arc::new(Self {
            hub: SessionHub::new(),
            probe: Mutex::new(None),
            sign_outs: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SessionStore for ScriptedStore {
    async fn get_current_session(&self) -> Result<Option<Session>, AppError> {
        let probe = self.probe.lock().unwrap().take();
        match probe {
            Some(rx) => rx.await.unwrap_or(Err(AppError::InternalError)),
            None => Ok(self.hub.current()),
        }
    }

    fn on_session_change(&self) -> SessionSubscription {
        self.hub.subscribe()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        if password != "secret" {
            return Err(AppError::AuthError("400: invalid_grant".into()));
        }
        let mut session = session();
        session.user.email = Some(email.to_string());
        self.hub.publish(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        self.hub.publish(None);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nav {
    Replace(String),
    Push(String),
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub calls: Mutex<Vec<Nav>>,
}

impl RecordingNavigator {
    pub fn calls(&self) -> Vec<Nav> {
        self.calls.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, path: &str) {
        self.calls.lock().unwrap().push(Nav::Replace(path.to_string()));
    }

    fn push(&self, path: &str) {
        self.calls.lock().unwrap().push(Nav::Push(path.to_string()));
    }
}

/// In-memory tables; `created_at` and `id` are stamped on insert.
#[derive(Default)]
pub struct MemoryRepository {
    rows: Mutex<HashMap<Collection, Vec<Value>>>,
    failing: Mutex<HashSet<Collection>>,
}

impl MemoryRepository {
    pub fn seed(&self, collection: Collection, rows: Vec<Value>) {
        self.rows
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .extend(rows);
    }

    pub fn rows(&self, collection: Collection) -> Vec<Value> {
        self.rows
            .lock()
            .unwrap()
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn fail(&self, collection: Collection) {
        self.failing.lock().unwrap().insert(collection);
    }

    pub fn heal(&self) {
        self.failing.lock().unwrap().clear();
    }

    fn check(&self, collection: Collection) -> Result<(), AppError> {
        if self.failing.lock().unwrap().contains(&collection) {
            return Err(AppError::DatabaseError(format!(
                "{} unavailable",
                collection.table()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl FeedbackRepository for MemoryRepository {
    async fn query(&self, query: RecentQuery) -> Result<Vec<Value>, AppError> {
        // Let the sibling fetch get polled before this one settles.
        tokio::task::yield_now().await;
        self.check(query.collection)?;

        let mut rows = self.rows(query.collection);
        rows.sort_by_key(|row| {
            std::cmp::Reverse(
                row["created_at"]
                    .as_str()
                    .and_then(|s| s.parse::<DateTime<Utc>>().ok()),
            )
        });
        rows.truncate(query.limit);
        Ok(rows)
    }

    async fn insert(&self, collection: Collection, mut record: Value) -> Result<(), AppError> {
        self.check(collection)?;
        record["id"] = json!(Uuid::new_v4());
        record["created_at"] = json!(Utc::now());
        self.seed(collection, vec![record]);
        Ok(())
    }
}

pub async fn settle_to(gate: &AccessGate, state: AccessState) {
    let mut rx = gate.watch();
    tokio::time::timeout(Duration::from_secs(2), rx.wait_for(|s| *s == state))
        .await
        .expect("gate did not reach expected state in time")
        .expect("gate state channel closed");
}

pub async fn let_tasks_run() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
