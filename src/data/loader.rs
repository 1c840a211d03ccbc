//! Question source loading.
//!
//! Loads the full question set once at startup from a CSV file or URL.

use std::env;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::Question;

/// Local filename tried when no explicit source or env override is given.
pub const DEFAULT_QUESTIONS_PATH: &str = "questions_en.csv";

/// Last-resort remote source, fetched when the default local file is absent.
pub const DEFAULT_QUESTIONS_URL: &str =
    "https://dst-de.s3.eu-west-3.amazonaws.com/fastapi_en/questions_en.csv";

/// Environment override for the question source; the same variable names
/// the persistence target (see `data::persist`).
pub const QUESTIONS_PATH_ENV: &str = "QUESTIONS_PATH";

const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Error type for question loading.
#[derive(Debug)]
pub enum LoadError {
    /// Error reading a local file.
    Io { path: PathBuf, source: io::Error },
    /// Error fetching a remote source (connect, timeout, or error status).
    Http { url: String, source: reqwest::Error },
    /// Error parsing the tabular content.
    Parse(csv::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            LoadError::Http { url, source } => {
                write!(f, "Failed to fetch {}: {}", url, source)
            }
            LoadError::Parse(e) => write!(f, "Failed to parse questions: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Http { source, .. } => Some(source),
            LoadError::Parse(e) => Some(e),
        }
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Parse(err)
    }
}

/// Load the question set, resolving the source in order: the explicit
/// argument, the `QUESTIONS_PATH` env var, the default local file, and
/// finally the compiled-in remote URL when that file does not exist.
///
/// Sources starting with `http` are fetched with a bounded timeout and
/// must answer with a non-error status.
pub async fn load_questions(source: Option<&str>) -> Result<Vec<Question>, LoadError> {
    let source = source
        .map(str::to_string)
        .or_else(|| env::var(QUESTIONS_PATH_ENV).ok())
        .unwrap_or_else(|| DEFAULT_QUESTIONS_PATH.to_string());

    if is_url(&source) {
        let content = fetch(&source).await?;
        parse_csv(content.as_slice())
    } else if Path::new(&source).exists() {
        let file = File::open(&source).map_err(|e| LoadError::Io {
            path: PathBuf::from(&source),
            source: e,
        })?;
        parse_csv(file)
    } else {
        let content = fetch(DEFAULT_QUESTIONS_URL).await?;
        parse_csv(content.as_slice())
    }
}

fn is_url(source: &str) -> bool {
    source.to_lowercase().starts_with("http")
}

async fn fetch(url: &str) -> Result<Vec<u8>, LoadError> {
    let http_error = |source: reqwest::Error| LoadError::Http {
        url: url.to_string(),
        source,
    };

    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(http_error)?;
    let response = client
        .get(url)
        .send()
        .await
        .map_err(http_error)?
        .error_for_status()
        .map_err(http_error)?;
    let bytes = response.bytes().await.map_err(http_error)?;
    Ok(bytes.to_vec())
}

/// Parse CSV content into questions.
///
/// Header names are trimmed and lowercased before matching the column
/// contract (`question`, `subject`, `correct`, `use`, `responsea`..
/// `responsed`); missing columns and short rows read as empty text. Row
/// position + 1 becomes the `qid`.
pub(crate) fn parse_csv<R: Read>(input: R) -> Result<Vec<Question>, LoadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let question_col = column("question");
    let subject_col = column("subject");
    let correct_col = column("correct");
    let use_col = column("use");
    let response_a_col = column("responsea");
    let response_b_col = column("responseb");
    let response_c_col = column("responsec");
    let response_d_col = column("responsed");

    let mut questions = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let field = |col: Option<usize>| {
            col.and_then(|c| record.get(c)).unwrap_or("").to_string()
        };
        questions.push(Question {
            qid: i as u32 + 1,
            question: field(question_col),
            subject: field(subject_col),
            correct: field(correct_col),
            use_: field(use_col),
            response_a: field(response_a_col),
            response_b: field(response_b_col),
            response_c: field(response_c_col),
            response_d: field(response_d_col),
        });
    }

    Ok(questions)
}
