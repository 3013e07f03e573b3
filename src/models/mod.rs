pub mod dashboard;
pub mod question;
pub mod rating;
pub mod stats;

pub use question::{NewQuestion, Question};
pub use rating::{Empaque, Llegada, NewRating, Rating, Sabor};
pub use stats::Stats;
