//! HTTP server module.
//!
//! Serves the questionnaire API over HTTP.

mod routes;
mod state;

pub use routes::{ApiError, PrettyJson, router};
pub use state::AppState;

use tokio::net::TcpListener;

use crate::auth::AuthConfig;
use crate::data::loader;
use crate::store::QuestionStore;

/// Run the questionnaire server.
///
/// A failed question load is not fatal: the server starts with an empty
/// store and every filtered query reports "no questions found" until the
/// source is fixed and the process restarted.
pub async fn run(port: u16, source: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let questions = match loader::load_questions(source).await {
        Ok(questions) => {
            tracing::info!("Loaded {} questions", questions.len());
            questions
        }
        Err(err) => {
            tracing::warn!("Could not load questions at startup: {}", err);
            Vec::new()
        }
    };

    let state = AppState::new(AuthConfig::default(), QuestionStore::new(questions));
    let app = router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
