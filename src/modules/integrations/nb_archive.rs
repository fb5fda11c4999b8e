//! Client for the national library's newspaper archive.
//!
//! One review search is one GET against the archive's item-search endpoint:
//! a fuzzy-proximity query built from the author and title, a two-year date
//! window starting at the publication year, and a media-type restriction to
//! newspapers. Hits come back with at most two text fragments each; the
//! fragments are stripped of all markup except emphasis spans before display.

use crate::domain::DomainError;
use crate::models::{ReviewHit, ReviewSearchOutcome};
use chrono::NaiveDate;
use scraper::{Html, Node};
use serde::Deserialize;

/// Items requested per search. Reaching this count means more hits may
/// exist beyond the response.
pub const RETRIEVAL_CAP: usize = 100;
const FRAGMENTS_PER_ITEM: u32 = 2;
const FRAGMENT_SIZE: u32 = 500;

/// The archive reads `«a b»~100` as "these terms within 100 tokens of each
/// other", which is loose enough to catch a review quoting both.
pub fn proximity_query(author: &str, title: &str) -> String {
    format!("«{} {}»~100", author, title)
}

/// Inclusive compact-date window `[year, year + 2]`: reviews trail the
/// translation by up to a couple of seasons.
fn date_window(publication_year: i64) -> (String, String) {
    (
        format!("{}0101", publication_year),
        format!("{}1231", publication_year + 2),
    )
}

/// Link to the archive's own search UI for the same query, used when the
/// retrieval cap truncates the result set.
pub fn external_search_url(web_base: &str, author: &str, title: &str, publication_year: i64) -> String {
    let (from_date, to_date) = date_window(publication_year);
    format!(
        "{}/search?q={}&mediatype=aviser&fromDate={}&toDate={}",
        web_base,
        urlencoding::encode(&proximity_query(author, title)),
        from_date,
        to_date
    )
}

#[derive(Debug, Deserialize)]
struct ItemSearchResponse {
    #[serde(rename = "_embedded")]
    embedded: Option<EmbeddedItems>,
}

#[derive(Debug, Deserialize)]
struct EmbeddedItems {
    #[serde(default)]
    items: Vec<ArchiveItem>,
}

#[derive(Debug, Deserialize)]
struct ArchiveItem {
    metadata: ItemMetadata,
    #[serde(rename = "contentFragments", default)]
    content_fragments: Vec<ContentFragment>,
}

#[derive(Debug, Deserialize)]
struct ItemMetadata {
    identifiers: ItemIdentifiers,
    title: String,
    #[serde(rename = "originInfo")]
    origin_info: OriginInfo,
}

#[derive(Debug, Deserialize)]
struct ItemIdentifiers {
    urn: String,
}

#[derive(Debug, Deserialize)]
struct OriginInfo {
    issued: String,
}

#[derive(Debug, Deserialize)]
struct ContentFragment {
    text: String,
    #[serde(rename = "pageNumber")]
    page_number: i64,
}

/// One search against the archive: single request, no retry, transport
/// default timeout. Failures classify as transient for the caller.
pub async fn search_newspapers(
    client: &reqwest::Client,
    api_base: &str,
    web_base: &str,
    author: &str,
    title: &str,
    publication_year: i64,
) -> Result<ReviewSearchOutcome, DomainError> {
    let query = proximity_query(author, title);
    let (from_date, to_date) = date_window(publication_year);
    let url = format!(
        "{}/catalog/v1/items?q={}&filter=mediatype:aviser&filter=contentClasses:jp2\
         &filter=date:[{}%20TO%20{}]&snippets=aviser&fragments={}&fragSize={}&size={}\
         &profile=nbdigital",
        api_base,
        urlencoding::encode(&query),
        from_date,
        to_date,
        FRAGMENTS_PER_ITEM,
        FRAGMENT_SIZE,
        RETRIEVAL_CAP
    );

    let resp = client
        .get(&url)
        .send()
        .await
        .map_err(|e| DomainError::External(format!("archive request failed: {}", e)))?;

    if !resp.status().is_success() {
        return Err(DomainError::External(format!(
            "archive returned status {}",
            resp.status()
        )));
    }

    let parsed: ItemSearchResponse = resp
        .json()
        .await
        .map_err(|e| DomainError::External(format!("archive response malformed: {}", e)))?;

    let items = parsed
        .embedded
        .map(|embedded| embedded.items)
        .unwrap_or_default();
    tracing::debug!(items = items.len(), query = %query, "archive search");

    let encoded_query = urlencoding::encode(&query).into_owned();
    let mut raw: Vec<(String, String, String, String)> = items
        .into_iter()
        .map(|item| {
            let urn = item.metadata.identifiers.urn;
            let (url, snippet) = match item.content_fragments.first() {
                Some(fragment) => (
                    format!(
                        "{}/items/{}?searchText={}&page={}",
                        web_base, urn, encoded_query, fragment.page_number
                    ),
                    sanitize_fragment(&fragment.text),
                ),
                None => (
                    format!("{}/items/{}?searchText={}", web_base, urn, encoded_query),
                    String::new(),
                ),
            };
            (item.metadata.origin_info.issued, item.metadata.title, url, snippet)
        })
        .collect();

    // Compact dates order lexically; sort before reformatting.
    raw.sort_by(|a, b| a.0.cmp(&b.0));

    let hits: Vec<ReviewHit> = raw
        .into_iter()
        .map(|(issued, newspaper, url, snippet)| ReviewHit {
            url,
            newspaper,
            date: format_issue_date(&issued),
            snippet,
        })
        .collect();

    let more_results_url = if hits.len() >= RETRIEVAL_CAP {
        Some(external_search_url(web_base, author, title, publication_year))
    } else {
        None
    };

    Ok(ReviewSearchOutcome {
        hits,
        more_results_url,
    })
}

/// `YYYYMMDD` → `DD.MM.YYYY`; anything else passes through unchanged.
pub fn format_issue_date(compact: &str) -> String {
    match NaiveDate::parse_from_str(compact, "%Y%m%d") {
        Ok(date) => date.format("%d.%m.%Y").to_string(),
        Err(_) => compact.to_string(),
    }
}

/// Strip all markup from a fragment except emphasis spans, which are
/// promoted to strong emphasis for display.
pub fn sanitize_fragment(fragment: &str) -> String {
    let parsed = Html::parse_fragment(fragment);
    let mut out = String::new();
    append_children(parsed.tree.root(), &mut out);
    out
}

fn append_children(node: ego_tree::NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&text),
            Node::Element(element) if element.name() == "em" => {
                out.push_str("<strong>");
                append_children(child, out);
                out.push_str("</strong>");
            }
            Node::Element(_) => append_children(child, out),
            _ => {}
        }
    }
}
