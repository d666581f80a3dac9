use serde::Serialize;
use thiserror::Error;

use crate::types::ParticipantKind;

/// Why an eligibility precondition failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibleReason {
    /// The rater (or the rated lecturer) is not attached to the course.
    CourseNotAttached,
    /// The student is not currently studying the course.
    NotEnrolled,
}

impl std::fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CourseNotAttached => f.write_str("course not attached"),
            Self::NotEnrolled => f.write_str("student not enrolled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradingError {
    #[error("{rater} cannot rate {ratee} on {course}: {reason}")]
    IneligibleRating {
        rater: String,
        ratee: String,
        course: String,
        reason: IneligibleReason,
    },

    #[error("cannot compare {left} with {right}")]
    TypeMismatch {
        left: ParticipantKind,
        right: ParticipantKind,
    },

    #[error("invalid grade value: {0}")]
    InvalidGradeValue(String),

    #[error("name and surname must not be blank (got {name:?} {surname:?})")]
    BlankIdentity { name: String, surname: String },
}

impl GradingError {
    pub fn is_ineligible(&self) -> bool {
        matches!(self, Self::IneligibleRating { .. })
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::IneligibleRating { .. } => "INELIGIBLE_RATING",
            Self::TypeMismatch { .. } => "TYPE_MISMATCH",
            Self::InvalidGradeValue(_) => "INVALID_GRADE_VALUE",
            Self::BlankIdentity { .. } => "BLANK_IDENTITY",
        }
    }
}

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("duplicate participant id: {0}")]
    DuplicateId(String),

    #[error("participant {0} has a blank name or surname")]
    InvalidIdentity(String),

    #[error("{kind} {id} cannot {action}")]
    WrongRole {
        id: String,
        kind: ParticipantKind,
        action: &'static str,
    },

    #[error(transparent)]
    Grading(#[from] GradingError),

    #[error("failed to parse roster: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required config: {0}")]
    MissingRequired(String),

    #[error("invalid value for {0}")]
    InvalidValue(String),
}

/// Error body embedded in reports for rejected actions.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub error: String,
    pub code: String,
}

impl From<&GradingError> for ErrorReport {
    fn from(err: &GradingError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code().to_string(),
        }
    }
}

impl From<&RosterError> for ErrorReport {
    fn from(err: &RosterError) -> Self {
        let code = match err {
            RosterError::Grading(inner) => inner.code(),
            RosterError::UnknownParticipant(_) => "UNKNOWN_PARTICIPANT",
            RosterError::InvalidIdentity(_) => "INVALID_IDENTITY",
            RosterError::DuplicateId(_) => "DUPLICATE_ID",
            RosterError::WrongRole { .. } => "WRONG_ROLE",
            RosterError::Parse(_) => "PARSE_ERROR",
            RosterError::Io(_) => "IO_ERROR",
        };
        Self {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}
