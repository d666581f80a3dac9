use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::Grade;

/// Grades received by one participant, keyed by course.
///
/// A course appears only after its first grade, so every stored sequence is
/// non-empty. Grades are only ever appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GradeBook {
    courses: BTreeMap<String, Vec<Grade>>,
}

impl GradeBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_grade(&mut self, course: impl Into<String>, grade: Grade) {
        self.courses.entry(course.into()).or_default().push(grade);
    }

    pub fn grades_for(&self, course: &str) -> &[Grade] {
        self.courses.get(course).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn courses(&self) -> impl Iterator<Item = &str> {
        self.courses.keys().map(String::as_str)
    }

    /// Total number of grades across all courses.
    pub fn len(&self) -> usize {
        self.courses.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Mean over every grade in every course, `0.0` when there are none.
    pub fn mean_grade(&self) -> f64 {
        mean(self.courses.values().flatten())
    }

    pub fn mean_for(&self, course: &str) -> f64 {
        mean(self.grades_for(course))
    }

    /// Mean of one course pooled across several grade books.
    pub fn mean_grade_for_course<'a, I>(course: &str, books: I) -> f64
    where
        I: IntoIterator<Item = &'a GradeBook>,
    {
        mean(books.into_iter().flat_map(|book| book.grades_for(course)))
    }
}

fn mean<'a>(grades: impl IntoIterator<Item = &'a Grade>) -> f64 {
    let (sum, count) = grades
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), grade| {
            (sum + u64::from(grade.value()), count + 1)
        });

    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
