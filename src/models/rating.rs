use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Taste, worst to best.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sabor {
    Malo,
    Regular,
    Excelente,
}

/// Temperature on arrival, coldest to hottest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Llegada {
    Frio,
    Tibio,
    Caliente,
}

/// Packaging integrity, worst to best.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Empaque {
    Batido,
    Bien,
    Intacto,
}

macro_rules! choice_enum {
    ($ty:ident { $($variant:ident => $lit:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: [$ty; 3] = [$($ty::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $lit),+
                }
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($lit => Ok($ty::$variant),)+
                    other => Err(format!("Unknown {} value: {}", stringify!($ty), other)),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum!(Sabor { Malo => "malo", Regular => "regular", Excelente => "excelente" });
choice_enum!(Llegada { Frio => "frio", Tibio => "tibio", Caliente => "caliente" });
choice_enum!(Empaque { Batido => "batido", Bien => "bien", Intacto => "intacto" });

impl Sabor {
    /// Contribution to the taste satisfaction score, in half points.
    pub fn half_points(&self) -> usize {
        match self {
            Sabor::Malo => 0,
            Sabor::Regular => 1,
            Sabor::Excelente => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub id: Uuid,
    pub sabor: Sabor,
    pub llegada: Llegada,
    pub empaque: Empaque,
    pub comentario: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Rating as submitted; `id` and `created_at` are assigned by the repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRating {
    pub sabor: Sabor,
    pub llegada: Llegada,
    pub empaque: Empaque,
    pub comentario: Option<String>,
}
