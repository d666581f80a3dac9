use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Serialize;

use super::{ensure_eligible, Gradable, Identity, Lecturer};
use crate::comparator;
use crate::error::GradingError;
use crate::gradebook::GradeBook;
use crate::types::{Grade, ParticipantKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    pub identity: Identity,
    pub courses_in_progress: BTreeSet<String>,
    pub finished_courses: BTreeSet<String>,
    /// Written only by reviewers through `Reviewer::rate_homework`
    homework_grades: GradeBook,
}

impl Student {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
    ) -> Result<Self, GradingError> {
        Ok(Self {
            identity: Identity::new(name, surname)?,
            courses_in_progress: BTreeSet::new(),
            finished_courses: BTreeSet::new(),
            homework_grades: GradeBook::new(),
        })
    }

    pub fn enroll(&mut self, course: impl Into<String>) {
        self.courses_in_progress.insert(course.into());
    }

    /// Moves `course` out of the in-progress set. Finished courses can no
    /// longer be rated in either direction.
    pub fn finish_course(&mut self, course: impl Into<String>) {
        let course = course.into();
        self.courses_in_progress.remove(&course);
        self.finished_courses.insert(course);
    }

    pub fn is_studying(&self, course: &str) -> bool {
        self.courses_in_progress.contains(course)
    }

    pub fn homework_grades(&self) -> &GradeBook {
        &self.homework_grades
    }

    pub(crate) fn record_homework(&mut self, course: &str, grade: Grade) {
        self.homework_grades.add_grade(course, grade);
    }

    #[must_use = "a rejected rating is reported through the returned error"]
    pub fn rate_lecturer(
        &self,
        lecturer: &mut Lecturer,
        course: &str,
        grade: Grade,
    ) -> Result<(), GradingError> {
        ensure_eligible(
            &lecturer.mentor,
            self,
            course,
            &self.identity,
            &lecturer.mentor.identity,
        )?;

        lecturer.record_lecture(course, grade);
        tracing::debug!(
            "{} rated lecturer {} on {} with {}",
            self.identity,
            lecturer.mentor.identity,
            course,
            grade
        );
        Ok(())
    }

    pub fn average_homework_grade(&self) -> f64 {
        self.average_grade()
    }

    pub fn compare(&self, other: &Student) -> Ordering {
        comparator::compare(self, other)
    }

    pub fn equals(&self, other: &Student) -> bool {
        self.compare(other) == Ordering::Equal
    }

    pub fn less_than(&self, other: &Student) -> bool {
        self.compare(other) == Ordering::Less
    }
}

impl Gradable for Student {
    fn kind(&self) -> ParticipantKind {
        ParticipantKind::Student
    }

    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn grade_book(&self) -> &GradeBook {
        &self.homework_grades
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IneligibleReason;
    use crate::participants::Reviewer;

    fn grade(value: u8) -> Grade {
        Grade::new(value).unwrap()
    }

    fn python_lecturer() -> Lecturer {
        let mut lecturer = Lecturer::new("Aleksandr", "Gertsen").unwrap();
        lecturer.attach("Python");
        lecturer
    }

    #[test]
    fn test_rate_lecturer_success() {
        let mut student = Student::new("Iosif", "Dzhugashvili").unwrap();
        student.enroll("Python");
        let mut lecturer = python_lecturer();

        student.rate_lecturer(&mut lecturer, "Python", grade(10)).unwrap();
        student.rate_lecturer(&mut lecturer, "Python", grade(9)).unwrap();

        assert_eq!(lecturer.lecture_grades().grades_for("Python").len(), 2);
        assert_eq!(lecturer.average_lecture_grade(), 9.5);
    }

    #[test]
    fn test_rate_lecturer_course_not_attached() {
        let mut student = Student::new("Iosif", "Dzhugashvili").unwrap();
        student.enroll("Git");
        let mut lecturer = python_lecturer();

        let err = student
            .rate_lecturer(&mut lecturer, "Git", grade(8))
            .unwrap_err();
        assert!(matches!(
            err,
            GradingError::IneligibleRating {
                reason: IneligibleReason::CourseNotAttached,
                ..
            }
        ));
        assert!(lecturer.lecture_grades().is_empty());
    }

    #[test]
    fn test_rate_lecturer_not_enrolled() {
        let student = Student::new("Iosif", "Dzhugashvili").unwrap();
        let mut lecturer = python_lecturer();

        let err = student
            .rate_lecturer(&mut lecturer, "Python", grade(8))
            .unwrap_err();
        assert!(err.is_ineligible());
        assert!(lecturer.lecture_grades().is_empty());
    }

    #[test]
    fn test_finished_course_is_not_ratable() {
        let mut student = Student::new("Iosif", "Dzhugashvili").unwrap();
        student.enroll("Python");
        student.finish_course("Python");
        let mut lecturer = python_lecturer();

        assert!(!student.is_studying("Python"));
        assert!(student.finished_courses.contains("Python"));
        assert!(student
            .rate_lecturer(&mut lecturer, "Python", grade(8))
            .is_err());
    }

    #[test]
    fn test_average_homework_grade_rounds() {
        let mut reviewer = Reviewer::new("Pavel", "Pestel").unwrap();
        reviewer.attach("Python");
        let mut student = Student::new("Iosif", "Dzhugashvili").unwrap();
        student.enroll("Python");

        for value in [10, 9, 7] {
            reviewer
                .rate_homework(&mut student, "Python", grade(value))
                .unwrap();
        }

        // 26 / 3 = 8.666...
        assert_eq!(student.average_homework_grade(), 8.7);
    }

    #[test]
    fn test_student_comparison() {
        let mut reviewer = Reviewer::new("Pavel", "Pestel").unwrap();
        reviewer.attach("Python");
        let mut first = Student::new("Iosif", "Dzhugashvili").unwrap();
        first.enroll("Python");
        let mut second = Student::new("Vladimir", "Ulyanov").unwrap();
        second.enroll("Python");

        reviewer.rate_homework(&mut first, "Python", grade(10)).unwrap();
        reviewer.rate_homework(&mut second, "Python", grade(9)).unwrap();

        assert!(second.less_than(&first));
        assert!(!first.less_than(&second));
        assert!(!first.equals(&second));
        assert_eq!(first.compare(&second), Ordering::Greater);

        reviewer.rate_homework(&mut second, "Python", grade(10)).unwrap();
        reviewer.rate_homework(&mut second, "Python", grade(10)).unwrap();
        reviewer.rate_homework(&mut first, "Python", grade(10)).unwrap();
        reviewer.rate_homework(&mut first, "Python", grade(9)).unwrap();
        // both 29 / 3
        assert!(first.equals(&second));
    }
}
