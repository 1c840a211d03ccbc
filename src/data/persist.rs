//! Best-effort write-back of the question set.
//!
//! After a successful append the whole store is re-serialized to the
//! persistence target. Failures never fail the request.

use std::env;
use std::path::{Path, PathBuf};

use crate::models::Question;

use super::loader::{DEFAULT_QUESTIONS_PATH, QUESTIONS_PATH_ENV};

/// Column order for write-back. The response headers keep their mixed-case
/// form, asymmetric with the lowercase load contract; loading normalizes
/// header case, so persisted files read back fine.
const COLUMNS: [&str; 8] = [
    "question",
    "subject",
    "correct",
    "use",
    "responseA",
    "responseB",
    "responseC",
    "responseD",
];

/// The persistence target: the `QUESTIONS_PATH` env var (the same variable
/// that overrides the load source) or the default local filename.
pub fn resolve_target() -> PathBuf {
    env::var(QUESTIONS_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_QUESTIONS_PATH))
}

/// Serialize the full question set to the resolved target, best-effort.
pub fn persist_questions(questions: &[Question]) {
    persist_to(&resolve_target(), questions);
}

/// Serialize the full question set to `target`, best-effort.
///
/// Skipped silently when the target does not currently exist; newly
/// created questions then stay in memory only. Write failures are logged
/// and swallowed; the caller still reports success.
pub fn persist_to(target: &Path, questions: &[Question]) {
    if !target.exists() {
        return;
    }
    if let Err(err) = write_csv(target, questions) {
        tracing::warn!(
            "Failed to persist {} questions to {}: {}",
            questions.len(),
            target.display(),
            err
        );
    }
}

fn write_csv(path: &Path, questions: &[Question]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(COLUMNS)?;
    for q in questions {
        writer.write_record([
            &q.question,
            &q.subject,
            &q.correct,
            &q.use_,
            &q.response_a,
            &q.response_b,
            &q.response_c,
            &q.response_d,
        ])?;
    }
    writer.flush()?;
    Ok(())
}
