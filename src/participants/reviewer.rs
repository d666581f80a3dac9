use serde::Serialize;

use super::{ensure_eligible, Identity, Mentor, Student};
use crate::error::GradingError;
use crate::types::Grade;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reviewer {
    pub mentor: Mentor,
}

impl Reviewer {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
    ) -> Result<Self, GradingError> {
        Ok(Self {
            mentor: Mentor::new(name, surname)?,
        })
    }

    pub fn attach(&mut self, course: impl Into<String>) {
        self.mentor.attach(course);
    }

    pub fn identity(&self) -> &Identity {
        &self.mentor.identity
    }

    #[must_use = "a rejected rating is reported through the returned error"]
    pub fn rate_homework(
        &self,
        student: &mut Student,
        course: &str,
        grade: Grade,
    ) -> Result<(), GradingError> {
        ensure_eligible(
            &self.mentor,
            student,
            course,
            &self.mentor.identity,
            &student.identity,
        )?;

        student.record_homework(course, grade);
        tracing::debug!(
            "{} rated homework of {} on {} with {}",
            self.mentor.identity,
            student.identity,
            course,
            grade
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IneligibleReason;

    fn grade(value: u8) -> Grade {
        Grade::new(value).unwrap()
    }

    #[test]
    fn test_rate_homework_updates_mean() {
        let mut reviewer = Reviewer::new("Pavel", "Pestel").unwrap();
        reviewer.attach("Python");
        let mut student = Student::new("Iosif", "Dzhugashvili").unwrap();
        student.enroll("Python");

        reviewer
            .rate_homework(&mut student, "Python", grade(9))
            .unwrap();
        assert_eq!(student.homework_grades().mean_for("Python"), 9.0);

        reviewer
            .rate_homework(&mut student, "Python", grade(7))
            .unwrap();
        assert_eq!(student.homework_grades().mean_for("Python"), 8.0);
        assert_eq!(student.homework_grades().len(), 2);
    }

    #[test]
    fn test_rate_homework_wrong_course_leaves_student_untouched() {
        let mut reviewer = Reviewer::new("Nikolai", "Chernyshevsky").unwrap();
        reviewer.attach("Git");
        let mut student = Student::new("Iosif", "Dzhugashvili").unwrap();
        student.enroll("Python");
        let before = student.clone();

        let err = reviewer
            .rate_homework(&mut student, "Git", grade(8))
            .unwrap_err();

        assert_eq!(
            err,
            GradingError::IneligibleRating {
                rater: "Nikolai Chernyshevsky".to_string(),
                ratee: "Iosif Dzhugashvili".to_string(),
                course: "Git".to_string(),
                reason: IneligibleReason::NotEnrolled,
            }
        );
        assert!(student.homework_grades().is_empty());
        assert_eq!(student, before);
    }

    #[test]
    fn test_rate_homework_course_not_attached() {
        let reviewer = Reviewer::new("Pavel", "Pestel").unwrap();
        let mut student = Student::new("Iosif", "Dzhugashvili").unwrap();
        student.enroll("Python");

        let err = reviewer
            .rate_homework(&mut student, "Python", grade(8))
            .unwrap_err();
        assert!(matches!(
            err,
            GradingError::IneligibleRating {
                reason: IneligibleReason::CourseNotAttached,
                ..
            }
        ));
        assert!(student.homework_grades().is_empty());
    }
}
