//! Weekly feedback statistics.
//!
//! Percentages are computed with exact integer arithmetic and rounded half up,
//! so `62.5` becomes `63`. Each category is rounded on its own, which means a
//! temperature or packaging triple can add up to 99 or 101.

use chrono::{DateTime, Datelike, Days, Local, NaiveTime, TimeZone, Utc};

use crate::models::{Empaque, Llegada, Rating, Sabor, Stats, stats::StatCard};

pub const EMPTY_STATS_MESSAGE: &str = "Aún no hay calificaciones para mostrar estadísticas.";

/// `round(100 * part / whole)` with ties going up. `whole` must be non-zero.
pub fn percentage(part: usize, whole: usize) -> u8 {
    ((200 * part + whole) / (2 * whole)) as u8
}

/// Local midnight of the most recent Monday at or before `now`.
pub fn week_start<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let day = now.weekday().num_days_from_sunday();
    let back = if day == 0 { 6 } else { day - 1 };
    local_midnight(now, back as u64)
}

/// Local midnight `days_back` calendar days before `now`.
fn local_midnight<Tz: TimeZone>(now: &DateTime<Tz>, days_back: u64) -> DateTime<Tz> {
    let tz = now.timezone();
    let date = now
        .date_naive()
        .checked_sub_days(Days::new(days_back))
        .unwrap_or(now.date_naive());
    let midnight = date.and_time(NaiveTime::MIN);

    // A DST gap can swallow midnight; take the UTC reading of the wall clock then.
    tz.from_local_datetime(&midnight)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

fn excelente_pct(ratings: &[&Rating]) -> u8 {
    if ratings.is_empty() {
        return 0;
    }
    let excelente = ratings.iter().filter(|r| r.sabor == Sabor::Excelente).count();
    percentage(excelente, ratings.len())
}

/// Aggregates `ratings` relative to the instant `now`. Input order is irrelevant.
/// Returns `None` for an empty slice.
pub fn compute_stats<Tz: TimeZone>(ratings: &[Rating], now: &DateTime<Tz>) -> Option<Stats> {
    let total = ratings.len();
    if total == 0 {
        return None;
    }

    let week_start = week_start(now);
    let prev_week_start = local_midnight(&week_start, 7).with_timezone(&Utc);
    let week_start = week_start.with_timezone(&Utc);

    let this_week: Vec<&Rating> = ratings
        .iter()
        .filter(|r| r.created_at >= week_start)
        .collect();
    let prev_week: Vec<&Rating> = ratings
        .iter()
        .filter(|r| r.created_at >= prev_week_start && r.created_at < week_start)
        .collect();

    let sabor_points: usize = ratings.iter().map(|r| r.sabor.half_points()).sum();
    let llegada = |v: Llegada| percentage(ratings.iter().filter(|r| r.llegada == v).count(), total);
    let empaque = |v: Empaque| percentage(ratings.iter().filter(|r| r.empaque == v).count(), total);

    let week_excelente_pct = excelente_pct(&this_week);
    let prev_excelente_pct = excelente_pct(&prev_week);

    Some(Stats {
        total,
        this_week: this_week.len(),
        sabor_pct: percentage(sabor_points, 2 * total),
        caliente_pct: llegada(Llegada::Caliente),
        tibio_pct: llegada(Llegada::Tibio),
        frio_pct: llegada(Llegada::Frio),
        intacto_pct: empaque(Empaque::Intacto),
        bien_pct: empaque(Empaque::Bien),
        batido_pct: empaque(Empaque::Batido),
        week_excelente_pct,
        trend: week_excelente_pct as i16 - prev_excelente_pct as i16,
    })
}

/// Same as [`compute_stats`], evaluated at the current local time.
pub fn compute_stats_now(ratings: &[Rating]) -> Option<Stats> {
    compute_stats(ratings, &Local::now())
}

pub fn summary_cards(stats: &Stats) -> Vec<StatCard> {
    let trend = match stats.trend {
        0 => None,
        t if t > 0 => Some(format!("↑ {}% vs sem. ant.", t)),
        t => Some(format!("↓ {}% vs sem. ant.", t.abs())),
    };

    vec![
        StatCard {
            id: "total",
            label: "Total reseñas",
            value: stats.total.to_string(),
            sub: format!("{} esta semana", stats.this_week),
            trend,
            bar: None,
        },
        StatCard {
            id: "sabor",
            label: "Satisfacción sabor",
            value: format!("{}%", stats.sabor_pct),
            sub: format!("{}% \"brutales\" esta semana", stats.week_excelente_pct),
            trend: None,
            bar: Some(stats.sabor_pct),
        },
        StatCard {
            id: "temperatura",
            label: "Llegó caliente",
            value: format!("{}%", stats.caliente_pct),
            sub: format!("{}% tibio · {}% frío", stats.tibio_pct, stats.frio_pct),
            trend: None,
            bar: Some(stats.caliente_pct),
        },
        StatCard {
            id: "empaque",
            label: "Empaque intacto",
            value: format!("{}%", stats.intacto_pct),
            sub: format!("{}% bien · {}% batido", stats.bien_pct, stats.batido_pct),
            trend: None,
            bar: Some(stats.intacto_pct),
        },
    ]
}
