use thiserror::Error;
use uuid::Uuid;

/// Rejected input to `add`/`edit`. Nothing is persisted when one of these
/// is returned; the caller re-prompts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("unknown academic year {0:?}; expected Freshman, Sophomore, Junior, or Senior")]
    InvalidYear(String),
    #[error("course name must not be empty")]
    EmptyCourse,
    #[error("credits must be greater than zero, got {0}")]
    NonPositiveCredits(f64),
}

/// A grade outside the 0-100 domain of the grade-point scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("grade {0} is outside the 0-100 range")]
pub struct InvalidGradeError(pub i64);

/// Removal target that does not exist. Logged and ignored by `remove`,
/// never surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no course record with id {0}")]
pub struct NotFoundError(pub Uuid);
