use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::Utc;

use crate::comparator::{best_of, compare_participants};
use crate::error::{ErrorReport, RosterError};
use crate::gradebook::{round_to_tenth, GradeBook};
use crate::participants::{Gradable, Lecturer, ParticipantRef, Reviewer, Student};
use crate::types::{
    ComparisonOutcome, CourseMeans, Grade, ParticipantKind, ParticipantSummary,
    RatingAction, RatingOutcome, RosterFile, RosterReport, StudentEntry, Verdict,
};

/// Every participant of one run, keyed by id.
///
/// Ids are unique across all three kinds.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    students: BTreeMap<String, Student>,
    lecturers: BTreeMap<String, Lecturer>,
    reviewers: BTreeMap<String, Reviewer>,
}

pub fn load_roster_file(path: &Path) -> Result<RosterFile, RosterError> {
    let content = std::fs::read_to_string(path)?;
    let file = serde_json::from_str(&content)?;
    Ok(file)
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(file: &RosterFile) -> Result<Self, RosterError> {
        let mut roster = Self::new();

        for entry in &file.students {
            roster.add_student(&entry.id, Self::student_from(entry)?)?;
        }
        for entry in &file.lecturers {
            let mut lecturer = Lecturer::new(entry.name.as_str(), entry.surname.as_str())
                .map_err(|_| RosterError::InvalidIdentity(entry.id.clone()))?;
            for course in &entry.courses_attached {
                lecturer.attach(course.as_str());
            }
            roster.add_lecturer(&entry.id, lecturer)?;
        }
        for entry in &file.reviewers {
            let mut reviewer = Reviewer::new(entry.name.as_str(), entry.surname.as_str())
                .map_err(|_| RosterError::InvalidIdentity(entry.id.clone()))?;
            for course in &entry.courses_attached {
                reviewer.attach(course.as_str());
            }
            roster.add_reviewer(&entry.id, reviewer)?;
        }

        Ok(roster)
    }

    fn student_from(entry: &StudentEntry) -> Result<Student, RosterError> {
        let mut student = Student::new(entry.name.as_str(), entry.surname.as_str())
            .map_err(|_| RosterError::InvalidIdentity(entry.id.clone()))?;
        for course in &entry.courses_in_progress {
            student.enroll(course.as_str());
        }
        for course in &entry.finished_courses {
            student.finish_course(course.as_str());
        }
        Ok(student)
    }

    fn ensure_unique(&self, id: &str) -> Result<(), RosterError> {
        match self.kind_of(id) {
            Some(_) => Err(RosterError::DuplicateId(id.to_string())),
            None => Ok(()),
        }
    }

    pub fn add_student(&mut self, id: &str, student: Student) -> Result<(), RosterError> {
        self.ensure_unique(id)?;
        self.students.insert(id.to_string(), student);
        Ok(())
    }

    pub fn add_lecturer(&mut self, id: &str, lecturer: Lecturer) -> Result<(), RosterError> {
        self.ensure_unique(id)?;
        self.lecturers.insert(id.to_string(), lecturer);
        Ok(())
    }

    pub fn add_reviewer(&mut self, id: &str, reviewer: Reviewer) -> Result<(), RosterError> {
        self.ensure_unique(id)?;
        self.reviewers.insert(id.to_string(), reviewer);
        Ok(())
    }

    pub fn kind_of(&self, id: &str) -> Option<ParticipantKind> {
        if self.students.contains_key(id) {
            Some(ParticipantKind::Student)
        } else if self.lecturers.contains_key(id) {
            Some(ParticipantKind::Lecturer)
        } else if self.reviewers.contains_key(id) {
            Some(ParticipantKind::Reviewer)
        } else {
            None
        }
    }

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.get(id)
    }

    pub fn lecturer(&self, id: &str) -> Option<&Lecturer> {
        self.lecturers.get(id)
    }

    pub fn participant(&self, id: &str) -> Result<ParticipantRef<'_>, RosterError> {
        if let Some(student) = self.students.get(id) {
            return Ok(ParticipantRef::Student(student));
        }
        if let Some(lecturer) = self.lecturers.get(id) {
            return Ok(ParticipantRef::Lecturer(lecturer));
        }
        if let Some(reviewer) = self.reviewers.get(id) {
            return Ok(ParticipantRef::Reviewer(reviewer));
        }
        Err(RosterError::UnknownParticipant(id.to_string()))
    }

    fn expect_role(
        &self,
        id: &str,
        expected: ParticipantKind,
        action: &'static str,
    ) -> Result<(), RosterError> {
        match self.kind_of(id) {
            Some(kind) if kind == expected => Ok(()),
            Some(kind) => Err(RosterError::WrongRole {
                id: id.to_string(),
                kind,
                action,
            }),
            None => Err(RosterError::UnknownParticipant(id.to_string())),
        }
    }

    /// Applies one rating. On any error the roster is left unchanged.
    pub fn apply(&mut self, action: &RatingAction) -> Result<(), RosterError> {
        match action {
            RatingAction::Homework {
                reviewer,
                student,
                course,
                grade,
            } => {
                let grade = Grade::try_from(grade.clone())?;
                self.expect_role(reviewer, ParticipantKind::Reviewer, "rate homework")?;
                self.expect_role(student, ParticipantKind::Student, "receive homework grades")?;

                let rater = self
                    .reviewers
                    .get(reviewer.as_str())
                    .ok_or_else(|| RosterError::UnknownParticipant(reviewer.clone()))?;
                let target = self
                    .students
                    .get_mut(student.as_str())
                    .ok_or_else(|| RosterError::UnknownParticipant(student.clone()))?;
                rater.rate_homework(target, course, grade)?;
            }
            RatingAction::Lecture {
                student,
                lecturer,
                course,
                grade,
            } => {
                let grade = Grade::try_from(grade.clone())?;
                self.expect_role(student, ParticipantKind::Student, "rate lecturers")?;
                self.expect_role(lecturer, ParticipantKind::Lecturer, "receive lecture grades")?;

                let rater = self
                    .students
                    .get(student.as_str())
                    .ok_or_else(|| RosterError::UnknownParticipant(student.clone()))?;
                let target = self
                    .lecturers
                    .get_mut(lecturer.as_str())
                    .ok_or_else(|| RosterError::UnknownParticipant(lecturer.clone()))?;
                rater.rate_lecturer(target, course, grade)?;
            }
        }

        Ok(())
    }

    pub fn compare(&self, first: &str, second: &str) -> Result<Verdict, RosterError> {
        let ordering = compare_participants(self.participant(first)?, self.participant(second)?)?;
        Ok(Verdict::from(ordering))
    }

    pub fn summaries(&self) -> Vec<ParticipantSummary> {
        let students = self
            .students
            .iter()
            .map(|(id, s)| ParticipantRef::Student(s).summary(id));
        let lecturers = self
            .lecturers
            .iter()
            .map(|(id, l)| ParticipantRef::Lecturer(l).summary(id));
        let reviewers = self
            .reviewers
            .iter()
            .map(|(id, r)| ParticipantRef::Reviewer(r).summary(id));

        students.chain(lecturers).chain(reviewers).collect()
    }

    /// Homework and lecture means for every course anyone is linked to.
    pub fn course_means(&self) -> Vec<CourseMeans> {
        let mut courses: BTreeSet<&str> = BTreeSet::new();
        for student in self.students.values() {
            courses.extend(student.courses_in_progress.iter().map(String::as_str));
            courses.extend(student.homework_grades().courses());
        }
        for lecturer in self.lecturers.values() {
            courses.extend(lecturer.mentor.courses_attached.iter().map(String::as_str));
            courses.extend(lecturer.lecture_grades().courses());
        }

        courses
            .into_iter()
            .map(|course| CourseMeans {
                course: course.to_string(),
                homework_mean: round_to_tenth(GradeBook::mean_grade_for_course(
                    course,
                    self.students.values().map(Student::homework_grades),
                )),
                lecture_mean: round_to_tenth(GradeBook::mean_grade_for_course(
                    course,
                    self.lecturers.values().map(Lecturer::lecture_grades),
                )),
            })
            .collect()
    }

    pub fn best_students(&self) -> Vec<String> {
        Self::best_ids(&self.students)
    }

    pub fn best_lecturers(&self) -> Vec<String> {
        Self::best_ids(&self.lecturers)
    }

    fn best_ids<T: Gradable>(participants: &BTreeMap<String, T>) -> Vec<String> {
        best_of(participants.iter())
            .into_iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Builds a roster from `file`, applies its ratings and comparisons in
    /// order, and reports every outcome.
    ///
    /// Rejected ratings and failed comparisons end up in the report; only a
    /// malformed roster is an error.
    pub fn replay(file: &RosterFile) -> Result<RosterReport, RosterError> {
        let mut roster = Self::from_file(file)?;
        tracing::info!(
            "Loaded roster: {} students, {} lecturers, {} reviewers",
            roster.students.len(),
            roster.lecturers.len(),
            roster.reviewers.len()
        );

        let mut ratings = Vec::with_capacity(file.ratings.len());
        for (index, action) in file.ratings.iter().enumerate() {
            let error = match roster.apply(action) {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!("Rating {} on '{}' rejected: {}", index, action.course(), e);
                    Some(ErrorReport::from(&e))
                }
            };
            ratings.push(RatingOutcome {
                index,
                action: action.clone(),
                accepted: error.is_none(),
                error,
            });
        }

        let comparisons = file
            .comparisons
            .iter()
            .map(|request| match roster.compare(&request.first, &request.second) {
                Ok(verdict) => ComparisonOutcome {
                    first: request.first.clone(),
                    second: request.second.clone(),
                    verdict: Some(verdict),
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(
                        "Comparison of {} and {} failed: {}",
                        request.first,
                        request.second,
                        e
                    );
                    ComparisonOutcome {
                        first: request.first.clone(),
                        second: request.second.clone(),
                        verdict: None,
                        error: Some(ErrorReport::from(&e)),
                    }
                }
            })
            .collect();

        let accepted = ratings.iter().filter(|r| r.accepted).count();
        tracing::info!(
            "Replayed {} ratings ({} accepted, {} rejected)",
            ratings.len(),
            accepted,
            ratings.len() - accepted
        );

        Ok(RosterReport {
            generated_at: Utc::now(),
            participants: roster.summaries(),
            ratings,
            comparisons,
            course_means: roster.course_means(),
            best_students: roster.best_students(),
            best_lecturers: roster.best_lecturers(),
        })
    }
}
