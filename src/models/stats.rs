use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub this_week: usize,
    pub sabor_pct: u8,
    pub caliente_pct: u8,
    pub tibio_pct: u8,
    pub frio_pct: u8,
    pub intacto_pct: u8,
    pub bien_pct: u8,
    pub batido_pct: u8,
    pub week_excelente_pct: u8,
    pub trend: i16,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub id: &'static str,
    pub label: &'static str,
    pub value: String,
    pub sub: String,
    pub trend: Option<String>,
    pub bar: Option<u8>,
}
