use serde::{Deserialize, Serialize};

/// One candidate newspaper mention. Ephemeral; built per search and never
/// persisted. `date` carries the display form `DD.MM.YYYY`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewHit {
    pub url: String,
    #[serde(rename = "avistittel")]
    pub newspaper: String,
    #[serde(rename = "dato")]
    pub date: String,
    #[serde(rename = "treff")]
    pub snippet: String,
}

/// Result of one review search. `more_results_url` is set when the hit count
/// reached the retrieval cap, pointing at the archive's own search UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSearchOutcome {
    pub hits: Vec<ReviewHit>,
    pub more_results_url: Option<String>,
}
