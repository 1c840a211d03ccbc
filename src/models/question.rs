use serde::{Deserialize, Serialize};

/// One multiple-choice question, as stored and served to clients.
///
/// The four response fields may be empty; `correct` is expected to name one
/// of the response slots (e.g. `"responseA"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier, assigned monotonically by the store.
    pub qid: u32,
    pub question: String,
    pub subject: String,
    pub correct: String,
    #[serde(rename = "use")]
    pub use_: String,
    #[serde(rename = "responseA", default)]
    pub response_a: String,
    #[serde(rename = "responseB", default)]
    pub response_b: String,
    #[serde(rename = "responseC", default)]
    pub response_c: String,
    #[serde(rename = "responseD", default)]
    pub response_d: String,
}

/// Payload for creating a question; `qid` is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestion {
    pub question: String,
    pub subject: String,
    pub correct: String,
    #[serde(rename = "use")]
    pub use_: String,
    #[serde(rename = "responseA", default)]
    pub response_a: Option<String>,
    #[serde(rename = "responseB", default)]
    pub response_b: Option<String>,
    #[serde(rename = "responseC", default)]
    pub response_c: Option<String>,
    #[serde(rename = "responseD", default)]
    pub response_d: Option<String>,
}
