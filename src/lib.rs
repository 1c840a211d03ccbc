//! # questionnaire-api
//!
//! An HTTP API serving randomized multiple-choice questions.
//!
//! Clients request a filtered random subset of questions for a given
//! use-case and subject set (`GET /questions`); admins add new questions
//! (`POST /questions`). The question set lives in memory, loaded once at
//! startup from a CSV file or URL, and is re-serialized best-effort after
//! each write.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use questionnaire_api::server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Serve on port 8000, resolving the question source from
//!     // QUESTIONS_PATH or the bundled defaults.
//!     server::run(8000, None).await
//! }
//! ```

pub mod auth;
pub mod data;
pub mod models;
pub mod selection;
pub mod server;
pub mod store;

pub use auth::{AuthConfig, AuthError, Identity, authenticate};
pub use data::{LoadError, load_questions};
pub use models::{NewQuestion, Question};
pub use selection::{SelectionError, select};
pub use store::QuestionStore;
