mod common;

use std::sync::{Arc, atomic::Ordering};

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use entre_alas_feedback::{
    dashboard::DashboardController,
    db::Collection,
    errors::DASHBOARD_LOAD_FAILED,
    models::dashboard::{DashboardTab, LoadStatus, TabBadges},
    navigation::LOGIN_PATH,
};
use serde_json::{Value, json};
use uuid::Uuid;

use common::{MemoryRepository, Nav, RecordingNavigator, ScriptedStore, session};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 14, 18, 0, 0).unwrap()
}

fn rating_row(sabor: &str, llegada: &str, empaque: &str, created_at: DateTime<Utc>) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "sabor": sabor,
        "llegada": llegada,
        "empaque": empaque,
        "comentario": null,
        "created_at": created_at,
    })
}

fn question_row(pregunta: &str, created_at: DateTime<Utc>) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "pregunta": pregunta,
        "telefono": null,
        "created_at": created_at,
    })
}

struct Fixture {
    repo: Arc<MemoryRepository>,
    store: Arc<ScriptedStore>,
    nav: Arc<RecordingNavigator>,
}

impl Fixture {
    fn new() -> Self {
        let store = ScriptedStore::live();
        store.hub.publish(Some(session()));
        Self {
            repo: Arc::new(MemoryRepository::default()),
            store,
            nav: Arc::new(RecordingNavigator::default()),
        }
    }

    fn controller(&self) -> DashboardController {
        DashboardController::new(self.repo.clone(), self.store.clone(), self.nav.clone())
    }

    fn seed_default(&self) {
        let t = base_time();
        self.repo.seed(
            Collection::Ratings,
            vec![
                rating_row("excelente", "caliente", "intacto", t - Duration::hours(2)),
                rating_row("malo", "frio", "batido", t),
                rating_row("regular", "tibio", "bien", t - Duration::hours(1)),
            ],
        );
        self.repo.seed(
            Collection::Questions,
            vec![
                question_row("¿Tienen alitas BBQ?", t - Duration::days(1)),
                question_row("¿Hasta qué hora abren?", t),
            ],
        );
    }
}

#[tokio::test]
async fn test_load_fills_view_newest_first() {
    let fx = Fixture::new();
    fx.seed_default();
    let mut dashboard = fx.controller();
    assert!(dashboard.is_loading());

    dashboard.load().await.unwrap();

    assert_eq!(dashboard.status(), &LoadStatus::Ready);
    assert_eq!(
        dashboard.badges(),
        TabBadges {
            ratings: 3,
            questions: 2
        }
    );
    let times: Vec<_> = dashboard.ratings().iter().map(|r| r.created_at).collect();
    assert!(times.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(dashboard.questions()[0].pregunta, "¿Hasta qué hora abren?");
}

#[tokio::test]
async fn test_load_caps_each_collection() {
    let fx = Fixture::new();
    let t = base_time();
    let rows = (0..120)
        .map(|i| rating_row("regular", "tibio", "bien", t - Duration::minutes(i)))
        .collect();
    fx.repo.seed(Collection::Ratings, rows);

    let mut dashboard = fx.controller();
    dashboard.load().await.unwrap();
    assert_eq!(dashboard.badges().ratings, 100);
    assert_eq!(dashboard.ratings()[0].created_at, t);

    let mut small = fx.controller().with_fetch_limit(5);
    small.load().await.unwrap();
    assert_eq!(small.badges().ratings, 5);
}

#[tokio::test]
async fn test_partial_failure_shows_nothing() {
    let fx = Fixture::new();
    fx.seed_default();
    fx.repo.fail(Collection::Questions);

    let mut dashboard = fx.controller();
    assert!(dashboard.load().await.is_err());

    assert_eq!(dashboard.error(), Some(DASHBOARD_LOAD_FAILED));
    assert!(dashboard.ratings().is_empty());
    assert!(dashboard.questions().is_empty());
}

#[tokio::test]
async fn test_failed_reload_keeps_previous_view() {
    let fx = Fixture::new();
    fx.seed_default();
    let mut dashboard = fx.controller();
    dashboard.load().await.unwrap();

    fx.repo.fail(Collection::Ratings);
    assert!(dashboard.load().await.is_err());
    assert_eq!(dashboard.badges().ratings, 3);
    assert!(matches!(dashboard.status(), LoadStatus::Failed(_)));

    fx.repo.heal();
    dashboard.load().await.unwrap();
    assert_eq!(dashboard.error(), None);
}

#[tokio::test]
async fn test_tabs_and_stats() {
    let fx = Fixture::new();
    fx.seed_default();
    let mut dashboard = fx.controller();
    dashboard.load().await.unwrap();

    assert_eq!(dashboard.active_tab(), DashboardTab::Summary);
    dashboard.select_tab(DashboardTab::Questions);
    assert_eq!(dashboard.active_tab(), DashboardTab::Questions);
    assert_eq!(dashboard.badges().questions, 2);

    let wednesday = FixedOffset::west_opt(6 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 5, 15, 9, 0, 0)
        .unwrap();
    let stats = dashboard.stats_at(&wednesday).unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.sabor_pct, 50);
    assert_eq!(stats.this_week, 3);
    assert_eq!(stats.week_excelente_pct, 33);
    assert!(dashboard.summary_cards().is_some());
}

#[tokio::test]
async fn test_empty_dashboard_has_no_summary() {
    let fx = Fixture::new();
    let mut dashboard = fx.controller();
    dashboard.load().await.unwrap();

    assert_eq!(dashboard.status(), &LoadStatus::Ready);
    assert_eq!(dashboard.stats(), None);
    assert!(dashboard.summary_cards().is_none());
}

#[tokio::test]
async fn test_sign_out_ends_session_and_navigates() {
    let fx = Fixture::new();
    let dashboard = fx.controller();

    dashboard.sign_out().await;

    assert_eq!(fx.store.sign_outs.load(Ordering::SeqCst), 1);
    assert!(fx.store.hub.current().is_none());
    assert_eq!(fx.nav.calls(), vec![Nav::Push(LOGIN_PATH.to_string())]);
}
