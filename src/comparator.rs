use std::cmp::Ordering;

use crate::error::GradingError;
use crate::participants::{Gradable, ParticipantRef};
use crate::types::Verdict;

/// Orders two participants of the same kind by their exact mean grade.
pub fn compare<T: Gradable + ?Sized>(first: &T, second: &T) -> Ordering {
    first
        .grade_book()
        .mean_grade()
        .total_cmp(&second.grade_book().mean_grade())
}

pub fn verdict<T: Gradable + ?Sized>(first: &T, second: &T) -> Verdict {
    Verdict::from(compare(first, second))
}

/// Compares participants whose kinds are only known at runtime.
///
/// Students compare with students and lecturers with lecturers. Any other
/// pairing, including two reviewers, is a `TypeMismatch`.
pub fn compare_participants(
    first: ParticipantRef<'_>,
    second: ParticipantRef<'_>,
) -> Result<Ordering, GradingError> {
    match (first, second) {
        (ParticipantRef::Student(a), ParticipantRef::Student(b)) => Ok(compare(a, b)),
        (ParticipantRef::Lecturer(a), ParticipantRef::Lecturer(b)) => Ok(compare(a, b)),
        (a, b) => Err(GradingError::TypeMismatch {
            left: a.kind(),
            right: b.kind(),
        }),
    }
}

/// Every participant sharing the highest average, in input order.
///
/// Ties are all returned rather than broken arbitrarily.
pub fn best_of<P, I>(participants: I) -> Vec<P>
where
    P: Gradable,
    I: IntoIterator<Item = P>,
{
    let mut best: Vec<P> = Vec::new();

    for participant in participants {
        match best.first().map(|current| compare(&participant, current)) {
            None | Some(Ordering::Equal) => best.push(participant),
            Some(Ordering::Greater) => {
                best.clear();
                best.push(participant);
            }
            Some(Ordering::Less) => {}
        }
    }

    best
}
