//! Display labels for the store's internal column names.
//!
//! The label tables are static configuration: a column the views emit but
//! the tables do not know is a configuration error, surfaced by [`verify`]
//! at startup rather than per request.

use crate::domain::DomainError;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static TRANSLATION_LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("mmsid", "MMSID"),
        ("urn", "URN"),
        ("title", "Oversatt tittel"),
        ("subtitle", "Undertittel"),
        ("main_author", "Forfatter"),
        ("translators", "Oversetter"),
        ("contributors", "Bidragsytere"),
        ("language", "Målform"),
        ("original_language", "Originalspråk"),
        ("original_title", "Originaltittel"),
        ("publisher", "Norsk forlag"),
        ("publication_year_int", "Publikasjonsår oversettelse"),
        ("publication_year_str", "Publikasjonsår (streng)"),
        ("ddc", "DDC"),
        ("ddc800", "DDC800"),
        ("ddc0", "DDC0"),
        ("publish_year", "Publikasjonsår originaltittel"),
        ("links", "Lenker"),
    ])
});

static ORIGINAL_EDITION_LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("mmsid", "MMSID"),
        ("title", "Originaltittel"),
        ("author", "Forfatter"),
        ("publish_year", "Publikasjonsår"),
        ("publishers", "Forlag"),
        ("publish_places_all", "Publikasjonssteder (alle)"),
        ("publish_places", "Publikasjonssteder"),
        ("address", "Adresse"),
        ("latitude", "Breddegrad"),
        ("longitude", "Lengdegrad"),
        ("work_key", "Verksnøkkel"),
    ])
});

/// Search result columns, in display order.
pub const RESULT_COLUMNS: &[&str] = &[
    "urn",
    "main_author",
    "translators",
    "title",
    "publication_year_int",
    "language",
    "publisher",
    "original_title",
    "original_language",
    "publish_year",
    "ddc800",
    "ddc0",
    "links",
    "mmsid",
];

/// Columns of the per-book translation view, in display order.
pub const TRANSLATION_DETAIL_COLUMNS: &[&str] = &[
    "mmsid",
    "title",
    "subtitle",
    "main_author",
    "translators",
    "contributors",
    "language",
    "original_language",
    "original_title",
    "publisher",
    "publication_year_int",
    "publication_year_str",
    "ddc",
    "ddc800",
    "ddc0",
    "publish_year",
    "urn",
];

/// Columns of the per-book original-edition view, in display order.
pub const ORIGINAL_EDITION_DETAIL_COLUMNS: &[&str] = &[
    "mmsid",
    "title",
    "author",
    "publish_year",
    "publishers",
    "publish_places_all",
    "publish_places",
    "address",
    "latitude",
    "longitude",
    "work_key",
];

pub fn translation_label(column: &str) -> Result<&'static str, DomainError> {
    TRANSLATION_LABELS.get(column).copied().ok_or_else(|| {
        DomainError::Configuration(format!("no display label for column '{}'", column))
    })
}

pub fn original_edition_label(column: &str) -> Result<&'static str, DomainError> {
    ORIGINAL_EDITION_LABELS.get(column).copied().ok_or_else(|| {
        DomainError::Configuration(format!(
            "no display label for original-edition column '{}'",
            column
        ))
    })
}

/// Check every column the views emit against the label tables. Run at boot
/// so label gaps fail before the first request.
pub fn verify() -> Result<(), DomainError> {
    for column in RESULT_COLUMNS.iter().chain(TRANSLATION_DETAIL_COLUMNS) {
        translation_label(column)?;
    }
    for column in ORIGINAL_EDITION_DETAIL_COLUMNS {
        original_edition_label(column)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_view_column_has_a_label() {
        verify().unwrap();
    }

    #[test]
    fn unmapped_column_is_a_configuration_error() {
        assert!(matches!(
            translation_label("shelf_position"),
            Err(DomainError::Configuration(_))
        ));
    }
}
