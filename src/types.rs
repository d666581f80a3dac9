use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorReport, GradingError};

pub const MIN_GRADE: u8 = 1;
pub const MAX_GRADE: u8 = 10;

/// A single grade in `MIN_GRADE..=MAX_GRADE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Number", into = "u8")]
pub struct Grade(u8);

impl Grade {
    pub fn new(value: u8) -> Result<Self, GradingError> {
        if (MIN_GRADE..=MAX_GRADE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GradingError::InvalidGradeValue(format!(
                "{} is outside {}..={}",
                value, MIN_GRADE, MAX_GRADE
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Grade {
    type Error = GradingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| {
                GradingError::InvalidGradeValue(format!(
                    "{} is outside {}..={}",
                    value, MIN_GRADE, MAX_GRADE
                ))
            })
            .and_then(Self::new)
    }
}

impl TryFrom<serde_json::Number> for Grade {
    type Error = GradingError;

    fn try_from(value: serde_json::Number) -> Result<Self, Self::Error> {
        if let Some(n) = value.as_i64() {
            return Self::try_from(n);
        }
        match value.as_f64() {
            // `9.0` arrives as a float; `as` saturates out-of-range values
            Some(f) if f.is_finite() && f.fract() == 0.0 => Self::try_from(f as i64),
            _ => Err(GradingError::InvalidGradeValue(format!(
                "{} is not a whole number",
                value
            ))),
        }
    }
}

impl std::str::FromStr for Grade {
    type Err = GradingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: i64 = s
            .trim()
            .parse()
            .map_err(|_| GradingError::InvalidGradeValue(format!("{:?} is not a whole number", s)))?;
        Self::try_from(n)
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        grade.0
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantKind {
    Student,
    Lecturer,
    Reviewer,
}

impl std::fmt::Display for ParticipantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student => f.write_str("student"),
            Self::Lecturer => f.write_str("lecturer"),
            Self::Reviewer => f.write_str("reviewer"),
        }
    }
}

/// Outcome of comparing two participants of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Tie,
    FirstBetter,
    SecondBetter,
}

impl From<std::cmp::Ordering> for Verdict {
    fn from(ordering: std::cmp::Ordering) -> Self {
        match ordering {
            std::cmp::Ordering::Equal => Verdict::Tie,
            std::cmp::Ordering::Greater => Verdict::FirstBetter,
            std::cmp::Ordering::Less => Verdict::SecondBetter,
        }
    }
}

// ============================================================================
// ROSTER INPUT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentEntry {
    pub id: String,
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub courses_in_progress: Vec<String>,
    #[serde(default)]
    pub finished_courses: Vec<String>,
}

/// Lecturers and reviewers share the same shape on input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorEntry {
    pub id: String,
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub courses_attached: Vec<String>,
}

/// A grading action replayed against the roster.
///
/// The grade stays a raw number here so that an out-of-range value is
/// reported as a rejected action instead of failing the whole roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RatingAction {
    /// A reviewer grades a student's homework
    Homework {
        reviewer: String,
        student: String,
        course: String,
        grade: serde_json::Number,
    },
    /// A student grades a lecturer's lectures
    Lecture {
        student: String,
        lecturer: String,
        course: String,
        grade: serde_json::Number,
    },
}

impl RatingAction {
    pub fn course(&self) -> &str {
        match self {
            Self::Homework { course, .. } | Self::Lecture { course, .. } => course,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub first: String,
    pub second: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterFile {
    #[serde(default)]
    pub students: Vec<StudentEntry>,
    #[serde(default)]
    pub lecturers: Vec<MentorEntry>,
    #[serde(default)]
    pub reviewers: Vec<MentorEntry>,
    #[serde(default)]
    pub ratings: Vec<RatingAction>,
    #[serde(default)]
    pub comparisons: Vec<ComparisonRequest>,
}

// ----------------------------------------------------------------------------
// Report
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantSummary {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub role: ParticipantKind,
    /// Homework average for students, lecture average for lecturers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_grade: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub courses_in_progress: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub finished_courses: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub courses_attached: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingOutcome {
    pub index: usize,
    pub action: RatingAction,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonOutcome {
    pub first: String,
    pub second: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseMeans {
    pub course: String,
    pub homework_mean: f64,
    pub lecture_mean: f64,
}

/// Complete replay report
#[derive(Debug, Clone, Serialize)]
pub struct RosterReport {
    pub generated_at: DateTime<Utc>,
    pub participants: Vec<ParticipantSummary>,
    pub ratings: Vec<RatingOutcome>,
    pub comparisons: Vec<ComparisonOutcome>,
    pub course_means: Vec<CourseMeans>,
    /// Ids of every student sharing the best homework average
    pub best_students: Vec<String>,
    /// Ids of every lecturer sharing the best lecture average
    pub best_lecturers: Vec<String>,
}
