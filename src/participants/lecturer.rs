use std::cmp::Ordering;

use serde::Serialize;

use super::{Gradable, Identity, Mentor};
use crate::comparator;
use crate::error::GradingError;
use crate::gradebook::GradeBook;
use crate::types::{Grade, ParticipantKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lecturer {
    pub mentor: Mentor,
    /// Written only by students through `Student::rate_lecturer`
    lecture_grades: GradeBook,
}

impl Lecturer {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
    ) -> Result<Self, GradingError> {
        Ok(Self {
            mentor: Mentor::new(name, surname)?,
            lecture_grades: GradeBook::new(),
        })
    }

    pub fn attach(&mut self, course: impl Into<String>) {
        self.mentor.attach(course);
    }

    pub fn lecture_grades(&self) -> &GradeBook {
        &self.lecture_grades
    }

    pub(crate) fn record_lecture(&mut self, course: &str, grade: Grade) {
        self.lecture_grades.add_grade(course, grade);
    }

    pub fn average_lecture_grade(&self) -> f64 {
        self.average_grade()
    }

    pub fn compare(&self, other: &Lecturer) -> Ordering {
        comparator::compare(self, other)
    }

    pub fn equals(&self, other: &Lecturer) -> bool {
        self.compare(other) == Ordering::Equal
    }

    pub fn less_than(&self, other: &Lecturer) -> bool {
        self.compare(other) == Ordering::Less
    }
}

impl Gradable for Lecturer {
    fn kind(&self) -> ParticipantKind {
        ParticipantKind::Lecturer
    }

    fn identity(&self) -> &Identity {
        &self.mentor.identity
    }

    fn grade_book(&self) -> &GradeBook {
        &self.lecture_grades
    }
}
