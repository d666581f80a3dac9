//! Course grade book: students, lecturers and homework reviewers rating each
//! other within courses, with averaging and comparison of participants.

pub mod comparator;
pub mod config;
pub mod error;
pub mod gradebook;
pub mod participants;
pub mod roster;
pub mod types;

pub use comparator::{best_of, compare, compare_participants, verdict};
pub use error::{GradingError, IneligibleReason, RosterError};
pub use gradebook::GradeBook;
pub use participants::{Gradable, Identity, Lecturer, Mentor, ParticipantRef, Reviewer, Student};
pub use roster::Roster;
pub use types::{Grade, ParticipantKind, Verdict};
