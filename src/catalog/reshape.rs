//! Result reshaping: deep links, display labels, and row ordering for the
//! corpus search table.

use crate::catalog::labels;
use crate::domain::DomainError;
use crate::models::{OriginalEdition, TranslationRecord};
use serde_json::{json, Map, Value};

/// Outcome of deriving the review-lookup link for one row. A row that cannot
/// derive degrades to `Empty` instead of aborting the batch, so the degraded
/// path is an explicit branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivedLink {
    Value(String),
    Empty,
}

impl DerivedLink {
    fn into_json(self) -> Value {
        match self {
            DerivedLink::Value(url) => json!(url),
            DerivedLink::Empty => json!(""),
        }
    }
}

/// Display-ready search result: label-ordered columns and one object per
/// row, keyed by the lowercased display labels.
#[derive(Debug, Clone)]
pub struct DisplayTable {
    pub columns: Vec<String>,
    pub rows: Vec<Map<String, Value>>,
}

/// Reverse a "Surname, Given" formatted name into natural order.
pub fn switch_author_name(author: &str) -> String {
    let mut parts: Vec<&str> = author.split(", ").collect();
    parts.reverse();
    parts.join(" ")
}

/// Truncate a title at the first colon, dropping the subtitle.
pub fn remove_subtitle(title: &str) -> &str {
    title.split(':').next().unwrap_or(title).trim()
}

/// Percent-encode a deep-link component, with periods stripped first.
/// Spaces come out as the literal `%20` token.
fn encode_link_part(text: &str) -> String {
    let stripped = text.replace('.', "");
    urlencoding::encode(&stripped).into_owned()
}

/// Derive the review-lookup link. All three parts must survive their
/// normalization: author reversed to natural order, title without subtitle,
/// publication year present.
pub fn review_link(
    author: Option<&str>,
    title: Option<&str>,
    publication_year: Option<i64>,
) -> DerivedLink {
    let (Some(author), Some(title), Some(year)) = (author, title, publication_year) else {
        return DerivedLink::Empty;
    };
    let author = switch_author_name(author);
    let title = remove_subtitle(title);
    if author.is_empty() || title.is_empty() {
        return DerivedLink::Empty;
    }
    DerivedLink::Value(format!(
        "Omtaler?author={}&title={}&publication_year={}",
        encode_link_part(&author),
        encode_link_part(title),
        year
    ))
}

/// Catalog deep link for a persistent identifier. A null identifier stays a
/// null link, keeping "no link" distinct from "link to an empty page".
pub fn urn_link(urn_base: &str, urn: Option<&str>) -> Option<String> {
    urn.map(|urn| format!("{}/{}", urn_base, urn))
}

pub fn metadata_link(mmsid: &str) -> String {
    format!("Metadata?mmsid={}", mmsid)
}

pub fn reshape(
    mut records: Vec<TranslationRecord>,
    urn_base: &str,
) -> Result<DisplayTable, DomainError> {
    // Ascending by translation year; rows without a year sort last.
    records.sort_by_key(|r| r.publication_year_int.unwrap_or(i64::MAX));

    let columns = labels::RESULT_COLUMNS
        .iter()
        .map(|column| labels::translation_label(column).map(|label| label.to_lowercase()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let mut row = Map::new();
        put(&mut row, "urn", json!(urn_link(urn_base, record.urn.as_deref())))?;
        put(&mut row, "main_author", json!(record.main_author))?;
        put(&mut row, "translators", json!(record.translators))?;
        put(&mut row, "title", json!(record.title))?;
        put(&mut row, "publication_year_int", json!(record.publication_year_int))?;
        put(&mut row, "language", json!(record.language))?;
        put(&mut row, "publisher", json!(record.publisher))?;
        put(&mut row, "original_title", json!(record.original_title))?;
        put(&mut row, "original_language", json!(record.original_language))?;
        put(&mut row, "publish_year", json!(record.publish_year))?;
        put(&mut row, "ddc800", json!(record.ddc800))?;
        put(&mut row, "ddc0", json!(record.ddc0))?;
        let link = review_link(
            record.main_author.as_deref(),
            record.title.as_deref(),
            record.publication_year_int,
        );
        put(&mut row, "links", link.into_json())?;
        put(&mut row, "mmsid", json!(metadata_link(&record.mmsid)))?;
        rows.push(row);
    }

    Ok(DisplayTable { columns, rows })
}

fn put(row: &mut Map<String, Value>, column: &str, value: Value) -> Result<(), DomainError> {
    let label = labels::translation_label(column)?;
    row.insert(label.to_lowercase(), value);
    Ok(())
}

/// Transposed label/value pairs for the per-book translation view.
pub fn labeled_translation(
    record: &TranslationRecord,
    urn_base: &str,
) -> Result<Vec<(String, Value)>, DomainError> {
    let mut pairs = Vec::new();
    for column in labels::TRANSLATION_DETAIL_COLUMNS {
        let label = labels::translation_label(column)?.to_string();
        let value = match *column {
            "mmsid" => json!(record.mmsid),
            "title" => json!(record.title),
            "subtitle" => json!(record.subtitle),
            "main_author" => json!(record.main_author),
            "translators" => json!(record.translators),
            "contributors" => json!(record.contributors),
            "language" => json!(record.language),
            "original_language" => json!(record.original_language),
            "original_title" => json!(record.original_title),
            "publisher" => json!(record.publisher),
            "publication_year_int" => json!(record.publication_year_int),
            "publication_year_str" => json!(record.publication_year_str),
            "ddc" => json!(record.ddc),
            "ddc800" => json!(record.ddc800),
            "ddc0" => json!(record.ddc0),
            "publish_year" => json!(record.publish_year),
            "urn" => json!(urn_link(urn_base, record.urn.as_deref())),
            other => {
                return Err(DomainError::Configuration(format!(
                    "translation view lists unknown column '{}'",
                    other
                )))
            }
        };
        pairs.push((label, value));
    }
    Ok(pairs)
}

/// Transposed label/value pairs for the per-book original-edition view.
pub fn labeled_original_edition(
    edition: &OriginalEdition,
) -> Result<Vec<(String, Value)>, DomainError> {
    let mut pairs = Vec::new();
    for column in labels::ORIGINAL_EDITION_DETAIL_COLUMNS {
        let label = labels::original_edition_label(column)?.to_string();
        let value = match *column {
            "mmsid" => json!(edition.mmsid),
            "title" => json!(edition.title),
            "author" => json!(edition.author),
            "publish_year" => json!(edition.publish_year),
            "publishers" => json!(edition.publishers),
            "publish_places_all" => json!(edition.publish_places_all),
            "publish_places" => json!(edition.publish_places),
            "address" => json!(edition.address),
            "latitude" => json!(edition.latitude),
            "longitude" => json!(edition.longitude),
            "work_key" => json!(edition.work_key),
            other => {
                return Err(DomainError::Configuration(format!(
                    "original-edition view lists unknown column '{}'",
                    other
                )))
            }
        };
        pairs.push((label, value));
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(mmsid: &str) -> TranslationRecord {
        TranslationRecord {
            mmsid: mmsid.to_string(),
            title: Some("Peer Gynt: et skuespill".to_string()),
            subtitle: None,
            main_author: Some("Ibsen, Henrik".to_string()),
            translators: Some("[Olsen, Kari]".to_string()),
            contributors: None,
            language: Some("nob".to_string()),
            original_language: Some("dan".to_string()),
            original_title: Some("Peer Gynt".to_string()),
            publisher: Some("Gyldendal".to_string()),
            publication_year_int: Some(1867),
            publication_year_str: Some("1867".to_string()),
            ddc: Some("839.822".to_string()),
            ddc800: Some(true),
            ddc0: Some(false),
            publish_year: Some(1867),
            urn: Some("URN:NBN:no-nb_digibok_2008".to_string()),
        }
    }

    #[test]
    fn author_name_reverses_to_natural_order() {
        assert_eq!(switch_author_name("Ibsen, Henrik"), "Henrik Ibsen");
        assert_eq!(switch_author_name("Hamsun"), "Hamsun");
    }

    #[test]
    fn subtitle_is_cut_at_the_first_colon() {
        assert_eq!(remove_subtitle("Peer Gynt: et skuespill"), "Peer Gynt");
        assert_eq!(remove_subtitle("Sult"), "Sult");
    }

    #[test]
    fn review_link_reorders_author_and_truncates_title() {
        let link = review_link(Some("Ibsen, Henrik"), Some("Peer Gynt: et skuespill"), Some(1867));
        assert_eq!(
            link,
            DerivedLink::Value(
                "Omtaler?author=Henrik%20Ibsen&title=Peer%20Gynt&publication_year=1867".to_string()
            )
        );
    }

    #[test]
    fn review_link_strips_periods_before_encoding() {
        let link = review_link(Some("Asbjørnsen, P. C."), Some("Eventyr"), Some(1852));
        match link {
            DerivedLink::Value(url) => assert!(!url.contains('.'), "periods survive in {}", url),
            DerivedLink::Empty => panic!("expected a derived link"),
        }
    }

    #[test]
    fn missing_parts_degrade_to_the_empty_link() {
        assert_eq!(review_link(None, Some("Sult"), Some(1890)), DerivedLink::Empty);
        assert_eq!(review_link(Some("Hamsun, Knut"), None, Some(1890)), DerivedLink::Empty);
        assert_eq!(review_link(Some("Hamsun, Knut"), Some("Sult"), None), DerivedLink::Empty);
    }

    #[test]
    fn null_identifier_reshapes_to_a_null_link() {
        let with_urn = record("1");
        let mut without_urn = record("2");
        without_urn.urn = None;

        let table = reshape(vec![with_urn, without_urn], "https://urn.nb.no").unwrap();
        assert_eq!(
            table.rows[0]["urn"],
            json!("https://urn.nb.no/URN:NBN:no-nb_digibok_2008")
        );
        assert_eq!(table.rows[1]["urn"], Value::Null);
    }

    #[test]
    fn rows_sort_ascending_by_translation_year_with_unknown_last() {
        let mut early = record("early");
        early.publication_year_int = Some(1850);
        let mut late = record("late");
        late.publication_year_int = Some(1990);
        let mut unknown = record("unknown");
        unknown.publication_year_int = None;

        let table = reshape(vec![late, unknown, early], "https://urn.nb.no").unwrap();
        let years: Vec<&Value> = table
            .rows
            .iter()
            .map(|r| &r["publikasjonsår oversettelse"])
            .collect();
        assert_eq!(years[0], &json!(1850));
        assert_eq!(years[1], &json!(1990));
        assert_eq!(years[2], &Value::Null);
    }

    #[test]
    fn columns_carry_lowercased_display_labels_in_order() {
        let table = reshape(vec![record("1")], "https://urn.nb.no").unwrap();
        assert_eq!(table.columns[0], "urn");
        assert_eq!(table.columns[1], "forfatter");
        assert_eq!(table.columns[3], "oversatt tittel");
        assert!(table.rows[0].contains_key("forfatter"));
        assert_eq!(table.rows[0]["mmsid"], json!("Metadata?mmsid=1"));
    }

    #[test]
    fn detail_views_pair_labels_with_values() {
        let pairs = labeled_translation(&record("1"), "https://urn.nb.no").unwrap();
        assert_eq!(pairs[0].0, "MMSID");
        assert!(pairs.iter().any(|(label, value)| {
            label == "Forfatter" && value == &json!("Ibsen, Henrik")
        }));
    }
}
