//! Random question selection.
//!
//! Filters the store by use-case and subject(s) and draws a fixed-size
//! random subset.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::Question;

/// The only result sizes a client may request.
pub const ALLOWED_COUNTS: [usize; 3] = [5, 10, 20];

/// Reasons a selection can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Requested count is not one of [`ALLOWED_COUNTS`].
    InvalidCount(usize),
    /// No question matched the requested use/subject filters.
    NoMatches { use_: String, subjects: Vec<String> },
    /// Fewer matches than the requested count; results are all-or-nothing.
    NotEnough { available: usize, requested: usize },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::InvalidCount(count) => {
                write!(f, "count must be one of 5, 10 or 20, got {}", count)
            }
            SelectionError::NoMatches { use_, subjects } => {
                write!(
                    f,
                    "No questions found for use='{}' and subjects={:?}",
                    use_, subjects
                )
            }
            SelectionError::NotEnough {
                available,
                requested,
            } => {
                write!(
                    f,
                    "Not enough questions available ({}) for the requested count {}",
                    available, requested
                )
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// Flatten raw subject parameters into normalized subject tokens.
///
/// Each element may itself be a comma-joined composite
/// (`"math,physics"`); parts are trimmed, empties dropped, the rest
/// lowercased.
pub fn normalize_subjects(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|s| s.split(','))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Draw exactly `count` distinct questions matching `use_` and `subjects`,
/// uniformly at random, in randomized presentation order.
///
/// Matching is case- and surrounding-whitespace-insensitive on both
/// category keys. The drawn subset gets an extra shuffle so the sampling
/// order is never what clients see. Callers supply the RNG; production uses
/// an unseeded process-wide source, tests a seeded one.
pub fn select<R: Rng + ?Sized>(
    pool: &[Question],
    use_: &str,
    subjects: &[String],
    count: usize,
    rng: &mut R,
) -> Result<Vec<Question>, SelectionError> {
    if !ALLOWED_COUNTS.contains(&count) {
        return Err(SelectionError::InvalidCount(count));
    }

    let wanted_use = use_.trim().to_lowercase();
    let wanted_subjects = normalize_subjects(subjects);

    let matches: Vec<&Question> = pool
        .iter()
        .filter(|q| {
            q.use_.trim().to_lowercase() == wanted_use
                && wanted_subjects.contains(&q.subject.trim().to_lowercase())
        })
        .collect();

    if matches.is_empty() {
        return Err(SelectionError::NoMatches {
            use_: use_.trim().to_string(),
            subjects: wanted_subjects,
        });
    }
    if matches.len() < count {
        return Err(SelectionError::NotEnough {
            available: matches.len(),
            requested: count,
        });
    }

    let mut drawn: Vec<Question> = matches
        .choose_multiple(rng, count)
        .map(|&q| q.clone())
        .collect();
    drawn.shuffle(rng);
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn question(qid: u32, use_: &str, subject: &str) -> Question {
        Question {
            qid,
            question: format!("question {}", qid),
            subject: subject.to_string(),
            correct: "responseA".to_string(),
            use_: use_.to_string(),
            response_a: "a".to_string(),
            response_b: "b".to_string(),
            response_c: String::new(),
            response_d: String::new(),
        }
    }

    fn pool() -> Vec<Question> {
        let mut pool: Vec<Question> = (1..=12).map(|i| question(i, "exam", "math")).collect();
        pool.push(question(13, "exam", "physics"));
        pool.push(question(14, "training", "math"));
        pool
    }

    #[test]
    fn test_selects_exact_count_of_distinct_matches() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(42);
        let selected = select(&pool, "exam", &["math".to_string()], 10, &mut rng).unwrap();

        assert_eq!(selected.len(), 10);
        let qids: HashSet<u32> = selected.iter().map(|q| q.qid).collect();
        assert_eq!(qids.len(), 10);
        // Every drawn question comes from the match set.
        assert!(selected.iter().all(|q| q.use_ == "exam" && q.subject == "math"));
    }

    #[test]
    fn test_same_seed_reproduces_selection() {
        let pool = pool();
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let first = select(&pool, "exam", &["math".to_string()], 5, &mut a).unwrap();
        let second = select(&pool, "exam", &["math".to_string()], 5, &mut b).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_count_outside_allowed_set() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(0);
        for count in [0, 1, 7, 15, 100] {
            assert_eq!(
                select(&pool, "exam", &["math".to_string()], count, &mut rng),
                Err(SelectionError::InvalidCount(count))
            );
        }
    }

    #[test]
    fn test_no_matches() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(0);
        let err = select(&pool, "exam", &["history".to_string()], 5, &mut rng).unwrap_err();
        assert_eq!(
            err,
            SelectionError::NoMatches {
                use_: "exam".to_string(),
                subjects: vec!["history".to_string()],
            }
        );
    }

    #[test]
    fn test_not_enough_matches() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(0);
        // Only one physics question exists for 'exam'.
        let err = select(&pool, "exam", &["physics".to_string()], 5, &mut rng).unwrap_err();
        assert_eq!(
            err,
            SelectionError::NotEnough {
                available: 1,
                requested: 5,
            }
        );
    }

    #[test]
    fn test_composite_subjects_are_flattened() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(3);
        let subjects = vec!["math, physics".to_string()];
        let selected = select(&pool, "exam", &subjects, 5, &mut rng).unwrap();
        assert_eq!(selected.len(), 5);
        assert!(selected.iter().all(|q| q.use_ == "exam"));
    }

    #[test]
    fn test_matching_ignores_case_and_whitespace() {
        let pool = vec![
            question(1, "  Exam ", " MATH "),
            question(2, "Exam", "Math"),
            question(3, "exam", "math"),
            question(4, "exam", "math"),
            question(5, "exam", "math"),
        ];
        let mut rng = StdRng::seed_from_u64(9);
        let selected = select(&pool, " EXAM ", &[" Math ".to_string()], 5, &mut rng).unwrap();
        assert_eq!(selected.len(), 5);
    }

    #[test]
    fn test_normalize_subjects_drops_empty_parts() {
        let raw = vec![" math, ,physics,".to_string(), "".to_string(), "BIO".to_string()];
        assert_eq!(
            normalize_subjects(&raw),
            vec!["math".to_string(), "physics".to_string(), "bio".to_string()]
        );
    }
}
