use std::time::{Duration, Instant};

use crate::{
    db::{FeedbackRepository, question::insert_question, rating::insert_rating},
    errors::AppError,
    validation::{QuestionForm, RatingForm},
};

pub const RATING_NOTICE_TTL: Duration = Duration::from_millis(3000);
pub const QUESTION_NOTICE_TTL: Duration = Duration::from_millis(3500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Short-lived message shown under a form.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    shown_at: Instant,
    ttl: Duration,
}

impl Notice {
    fn new(kind: NoticeKind, text: &str, ttl: Duration) -> Self {
        Self {
            kind,
            text: text.to_string(),
            shown_at: Instant::now(),
            ttl,
        }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= self.ttl
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Field errors keep the form open; a notice reports the insert outcome.
#[derive(Debug)]
pub enum SubmitOutcome {
    Invalid(AppError),
    Sent(Notice),
    Failed(Notice),
}

impl SubmitOutcome {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            SubmitOutcome::Sent(n) | SubmitOutcome::Failed(n) => Some(n),
            SubmitOutcome::Invalid(_) => None,
        }
    }
}

pub async fn submit_rating(repo: &dyn FeedbackRepository, form: &RatingForm) -> SubmitOutcome {
    let rating = match form.validate() {
        Ok(rating) => rating,
        Err(errors) => return SubmitOutcome::Invalid(AppError::Validation(errors)),
    };

    match insert_rating(repo, &rating).await {
        Ok(()) => SubmitOutcome::Sent(Notice::new(
            NoticeKind::Success,
            "¡Gracias! Tu calificación fue registrada 🔥",
            RATING_NOTICE_TTL,
        )),
        Err(e) => {
            tracing::error!("Failed to submit rating: {}", e);
            SubmitOutcome::Failed(Notice::new(
                NoticeKind::Error,
                "Error al enviar. Intenta de nuevo.",
                RATING_NOTICE_TTL,
            ))
        }
    }
}

pub async fn submit_question(repo: &dyn FeedbackRepository, form: &QuestionForm) -> SubmitOutcome {
    let question = match form.validate() {
        Ok(question) => question,
        Err(errors) => return SubmitOutcome::Invalid(AppError::Validation(errors)),
    };

    match insert_question(repo, &question).await {
        Ok(()) => SubmitOutcome::Sent(Notice::new(
            NoticeKind::Success,
            "¡Listo! En Entre Alas te respondemos muy pronto 🍗🔥",
            QUESTION_NOTICE_TTL,
        )),
        Err(e) => {
            tracing::error!("Failed to submit question: {}", e);
            SubmitOutcome::Failed(Notice::new(
                NoticeKind::Error,
                "Hubo un problema al enviar tu pregunta. Intenta de nuevo.",
                QUESTION_NOTICE_TTL,
            ))
        }
    }
}
