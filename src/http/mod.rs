pub mod client;

pub use client::{SupabaseClient, check_status};
