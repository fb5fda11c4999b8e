use serde::{Deserialize, Serialize};

/// One row of the corpus result set: the translation fact row joined with the
/// original edition's publish year and the persistent identifier. Read-only;
/// sourced from the analytical store and never written back.
///
/// `translators` and `contributors` hold several sub-values per record in the
/// store; the select casts them to text so one record carries the rendered
/// list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRecord {
    pub mmsid: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub main_author: Option<String>,
    pub translators: Option<String>,
    pub contributors: Option<String>,
    pub language: Option<String>,
    pub original_language: Option<String>,
    pub original_title: Option<String>,
    pub publisher: Option<String>,
    pub publication_year_int: Option<i64>,
    pub publication_year_str: Option<String>,
    pub ddc: Option<String>,
    pub ddc800: Option<bool>,
    pub ddc0: Option<bool>,
    /// Publication year of the original edition, when known.
    pub publish_year: Option<i64>,
    /// Persistent identifier, when the lookup table has one.
    pub urn: Option<String>,
}
