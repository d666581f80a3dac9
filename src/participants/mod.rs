pub mod lecturer;
pub mod reviewer;
pub mod student;

pub use lecturer::Lecturer;
pub use reviewer::Reviewer;
pub use student::Student;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{GradingError, IneligibleReason};
use crate::gradebook::{round_to_tenth, GradeBook};
use crate::types::{ParticipantKind, ParticipantSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub name: String,
    pub surname: String,
}

impl Identity {
    /// Fails with `BlankIdentity` when either part is empty or whitespace.
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
    ) -> Result<Self, GradingError> {
        let (name, surname) = (name.into(), surname.into());
        if name.trim().is_empty() || surname.trim().is_empty() {
            return Err(GradingError::BlankIdentity { name, surname });
        }
        Ok(Self { name, surname })
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.surname)
    }
}

/// Identity plus the courses a lecturer or reviewer is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mentor {
    pub identity: Identity,
    pub courses_attached: BTreeSet<String>,
}

impl Mentor {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
    ) -> Result<Self, GradingError> {
        Ok(Self {
            identity: Identity::new(name, surname)?,
            courses_attached: BTreeSet::new(),
        })
    }

    pub fn attach(&mut self, course: impl Into<String>) {
        self.courses_attached.insert(course.into());
    }

    pub fn is_attached(&self, course: &str) -> bool {
        self.courses_attached.contains(course)
    }
}

/// Anything that receives grades and can therefore be averaged and compared.
pub trait Gradable {
    fn kind(&self) -> ParticipantKind;

    fn identity(&self) -> &Identity;

    fn grade_book(&self) -> &GradeBook;

    /// Mean of the grade book rounded to one decimal place, for display.
    /// Comparisons use the exact mean.
    fn average_grade(&self) -> f64 {
        round_to_tenth(self.grade_book().mean_grade())
    }
}

impl<T: Gradable + ?Sized> Gradable for &T {
    fn kind(&self) -> ParticipantKind {
        (**self).kind()
    }

    fn identity(&self) -> &Identity {
        (**self).identity()
    }

    fn grade_book(&self) -> &GradeBook {
        (**self).grade_book()
    }
}

/// A participant paired with its key, so rankings can report keys directly.
impl<K, T: Gradable + ?Sized> Gradable for (K, &T) {
    fn kind(&self) -> ParticipantKind {
        self.1.kind()
    }

    fn identity(&self) -> &Identity {
        self.1.identity()
    }

    fn grade_book(&self) -> &GradeBook {
        self.1.grade_book()
    }
}

/// Mean of one course pooled across several participants.
pub fn mean_grade_for_course<'a, T, I>(course: &str, participants: I) -> f64
where
    T: Gradable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    GradeBook::mean_grade_for_course(course, participants.into_iter().map(|p| p.grade_book()))
}

/// Checks that `mentor` is attached to `course` and `student` is studying it.
///
/// `rater` and `ratee` only feed the error message.
pub(crate) fn ensure_eligible(
    mentor: &Mentor,
    student: &Student,
    course: &str,
    rater: &Identity,
    ratee: &Identity,
) -> Result<(), GradingError> {
    let reason = if !mentor.is_attached(course) {
        IneligibleReason::CourseNotAttached
    } else if !student.is_studying(course) {
        IneligibleReason::NotEnrolled
    } else {
        return Ok(());
    };

    Err(GradingError::IneligibleRating {
        rater: rater.to_string(),
        ratee: ratee.to_string(),
        course: course.to_string(),
        reason,
    })
}

/// A borrowed participant of any kind, for checks that only happen at runtime.
#[derive(Debug, Clone, Copy)]
pub enum ParticipantRef<'a> {
    Student(&'a Student),
    Lecturer(&'a Lecturer),
    Reviewer(&'a Reviewer),
}

impl<'a> ParticipantRef<'a> {
    pub fn kind(&self) -> ParticipantKind {
        match self {
            Self::Student(_) => ParticipantKind::Student,
            Self::Lecturer(_) => ParticipantKind::Lecturer,
            Self::Reviewer(_) => ParticipantKind::Reviewer,
        }
    }

    pub fn identity(&self) -> &'a Identity {
        match self {
            Self::Student(s) => &s.identity,
            Self::Lecturer(l) => &l.mentor.identity,
            Self::Reviewer(r) => &r.mentor.identity,
        }
    }

    /// Role-specific average; reviewers hold no grades.
    pub fn average_grade(&self) -> Option<f64> {
        match self {
            Self::Student(s) => Some(s.average_homework_grade()),
            Self::Lecturer(l) => Some(l.average_lecture_grade()),
            Self::Reviewer(_) => None,
        }
    }

    pub fn summary(&self, id: &str) -> ParticipantSummary {
        let identity = self.identity();
        let mut summary = ParticipantSummary {
            id: id.to_string(),
            name: identity.name.clone(),
            surname: identity.surname.clone(),
            role: self.kind(),
            average_grade: self.average_grade(),
            courses_in_progress: Vec::new(),
            finished_courses: Vec::new(),
            courses_attached: Vec::new(),
        };

        match self {
            Self::Student(s) => {
                summary.courses_in_progress = s.courses_in_progress.iter().cloned().collect();
                summary.finished_courses = s.finished_courses.iter().cloned().collect();
            }
            Self::Lecturer(l) => {
                summary.courses_attached = l.mentor.courses_attached.iter().cloned().collect();
            }
            Self::Reviewer(r) => {
                summary.courses_attached = r.mentor.courses_attached.iter().cloned().collect();
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Grade;

    #[test]
    fn test_identity_display() {
        let identity = Identity::new("Aleksandr", "Gertsen").unwrap();
        assert_eq!(identity.to_string(), "Aleksandr Gertsen");
    }

    #[test]
    fn test_blank_identity_rejected() {
        let err = Identity::new("", "Gertsen").unwrap_err();
        assert_eq!(err.code(), "BLANK_IDENTITY");
        assert!(Identity::new("Aleksandr", "   ").is_err());
        assert!(Mentor::new(" ", "Pestel").is_err());
        assert!(Student::new("Iosif", "").is_err());
        assert!(Lecturer::new("", "").is_err());
        assert!(Reviewer::new("", "Chernyshevsky").is_err());
    }

    #[test]
    fn test_mentor_attach() {
        let mut mentor = Mentor::new("Pavel", "Pestel").unwrap();
        mentor.attach("Python");
        mentor.attach("Python");
        assert!(mentor.is_attached("Python"));
        assert!(!mentor.is_attached("Git"));
        assert_eq!(mentor.courses_attached.len(), 1);
    }

    #[test]
    fn test_ensure_eligible_reasons() {
        let mut mentor = Mentor::new("Pavel", "Pestel").unwrap();
        let mut student = Student::new("Vladimir", "Ulyanov").unwrap();
        student.enroll("Python");

        let err = ensure_eligible(&mentor, &student, "Python", &mentor.identity, &student.identity)
            .unwrap_err();
        assert!(matches!(
            err,
            GradingError::IneligibleRating {
                reason: IneligibleReason::CourseNotAttached,
                ..
            }
        ));

        mentor.attach("Git");
        let err = ensure_eligible(&mentor, &student, "Git", &mentor.identity, &student.identity)
            .unwrap_err();
        assert!(matches!(
            err,
            GradingError::IneligibleRating {
                reason: IneligibleReason::NotEnrolled,
                ..
            }
        ));

        mentor.attach("Python");
        assert!(
            ensure_eligible(&mentor, &student, "Python", &mentor.identity, &student.identity)
                .is_ok()
        );
    }

    #[test]
    fn test_mean_grade_for_course_across_students() {
        let mut reviewer = Reviewer::new("Pavel", "Pestel").unwrap();
        reviewer.attach("Python");
        let mut first = Student::new("Iosif", "Dzhugashvili").unwrap();
        first.enroll("Python");
        let mut second = Student::new("Vladimir", "Ulyanov").unwrap();
        second.enroll("Python");

        reviewer
            .rate_homework(&mut first, "Python", Grade::new(10).unwrap())
            .unwrap();
        reviewer
            .rate_homework(&mut second, "Python", Grade::new(9).unwrap())
            .unwrap();
        reviewer
            .rate_homework(&mut second, "Python", Grade::new(8).unwrap())
            .unwrap();

        let students = vec![first, second];
        assert!((mean_grade_for_course("Python", &students) - 9.0).abs() < f64::EPSILON);
        assert_eq!(mean_grade_for_course("Git", &students), 0.0);
    }

    #[test]
    fn test_participant_summary() {
        let mut student = Student::new("Iosif", "Dzhugashvili").unwrap();
        student.enroll("Python");
        student.enroll("Git");
        student.finish_course("Intro to Programming");
        let reviewer = Reviewer::new("Pavel", "Pestel").unwrap();

        let summary = ParticipantRef::Student(&student).summary("s1");
        assert_eq!(summary.role, ParticipantKind::Student);
        assert_eq!(summary.average_grade, Some(0.0));
        assert_eq!(summary.courses_in_progress, vec!["Git", "Python"]);
        assert_eq!(summary.finished_courses, vec!["Intro to Programming"]);

        let summary = ParticipantRef::Reviewer(&reviewer).summary("r1");
        assert_eq!(summary.average_grade, None);
        assert!(summary.courses_attached.is_empty());
    }
}
