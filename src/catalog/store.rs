//! Read-only access to the analytical store.
//!
//! Every operation opens its own read-only connection and drops it when the
//! query finishes; no write path exists and no cross-query transaction is
//! needed.

use crate::catalog::predicate::{
    build_predicate, BindValue, FilterSpec, FilterValue, Predicate,
};
use crate::domain::DomainError;
use crate::models::{OriginalEdition, PublicationSite, SiteBook, TranslationRecord};
use duckdb::{params, params_from_iter, AccessMode, Config, Connection};
use serde::{Deserialize, Serialize};

const OPENLIBRARY_WEB: &str = "https://www.openlibrary.org";

const SEARCH_SELECT: &str = "SELECT t.mmsid, t.title, t.subtitle, t.main_author, \
     t.translators::varchar, t.contributors::varchar, t.language, t.original_language, \
     t.original_title, t.publisher, t.publication_year_int, t.publication_year_str, \
     t.ddc, t.ddc800, t.ddc0, ol.publish_year, u.urn \
     FROM translations t \
     LEFT JOIN urn_mmsid u ON u.mmsid = t.mmsid \
     LEFT JOIN ol_first_editions ol ON ol.mmsid = t.mmsid";

/// Fields the search form never exposes.
const HIDDEN_FILTER_COLUMNS: &[&str] = &[
    "mmsid",
    "ddc",
    "publication_year_str",
    "ddc0",
    "contributors",
    "subtitle",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageOption {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
}

/// Restrictions shared by the map views. The map always limits itself to
/// fiction-flagged records with a geocodable address.
#[derive(Debug, Clone, Default)]
pub struct MapFilter {
    pub year_range: Option<(i64, i64)>,
    pub author: Option<String>,
    pub translator: Option<String>,
}

#[derive(Clone)]
pub struct Catalog {
    path: String,
}

impl Catalog {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    fn connect(&self) -> Result<Connection, DomainError> {
        let config = Config::default().access_mode(AccessMode::ReadOnly)?;
        Ok(Connection::open_with_flags(&self.path, config)?)
    }

    /// Open and drop one connection, verifying the store is reachable.
    pub fn probe(&self) -> Result<(), DomainError> {
        self.connect().map(|_| ())
    }

    /// Corpus search: the three-table join, restricted by the built
    /// predicate. The empty specification runs the unconditional query.
    pub fn search_translations(
        &self,
        filters: &FilterSpec,
    ) -> Result<Vec<TranslationRecord>, DomainError> {
        let (sql, bind) = match build_predicate(filters)? {
            Predicate::Unrestricted => (SEARCH_SELECT.to_string(), Vec::new()),
            Predicate::Where { sql, params } => {
                (format!("{} WHERE {}", SEARCH_SELECT, sql), params)
            }
        };
        tracing::debug!(sql = %sql, params = bind.len(), "corpus search");

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(bind.iter()), read_translation)?;
        let records = rows.collect::<Result<Vec<_>, duckdb::Error>>()?;
        Ok(records)
    }

    /// One translation row with its original edition, for the side-by-side
    /// metadata view.
    pub fn get_book(
        &self,
        mmsid: &str,
    ) -> Result<(TranslationRecord, Option<OriginalEdition>), DomainError> {
        let conn = self.connect()?;

        let sql = format!("{} WHERE t.mmsid = ?", SEARCH_SELECT);
        let translation = conn
            .prepare(&sql)?
            .query_row(params![mmsid], read_translation)
            .map_err(not_found_or)?;

        let edition = conn
            .prepare(
                "SELECT mmsid, title, author, publish_year, publishers, publish_places_all, \
                 publish_places, address, latitude, longitude, work_key \
                 FROM ol_first_editions WHERE mmsid = ?",
            )?
            .query_row(params![mmsid], |row| {
                Ok(OriginalEdition {
                    mmsid: row.get(0)?,
                    title: row.get(1)?,
                    author: row.get(2)?,
                    publish_year: row.get(3)?,
                    publishers: row.get(4)?,
                    publish_places_all: row.get(5)?,
                    publish_places: row.get(6)?,
                    address: row.get(7)?,
                    latitude: row.get(8)?,
                    longitude: row.get(9)?,
                    work_key: row.get(10)?,
                })
            });

        let edition = match edition {
            Ok(edition) => Some(edition),
            Err(duckdb::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(e.into()),
        };

        Ok((translation, edition))
    }

    /// Distinct original languages present in the corpus, with display names.
    pub fn available_languages(&self) -> Result<Vec<LanguageOption>, DomainError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT l.language_code, l.language_nob \
             FROM translations t \
             JOIN languages l ON l.language_code = t.original_language \
             ORDER BY l.language_nob",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(LanguageOption {
                code: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, duckdb::Error>>()?)
    }

    /// Filterable columns of the fact table, from the store's own schema,
    /// minus the fields the search form never exposes.
    pub fn filterable_columns(&self) -> Result<Vec<ColumnInfo>, DomainError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT column_name, data_type FROM information_schema.columns \
             WHERE table_name = ?",
        )?;
        let rows = stmt.query_map(params!["translations"], |row| {
            Ok(ColumnInfo {
                name: row.get(0)?,
                data_type: row.get(1)?,
            })
        })?;
        let columns = rows.collect::<Result<Vec<_>, duckdb::Error>>()?;
        Ok(columns
            .into_iter()
            .filter(|c| !HIDDEN_FILTER_COLUMNS.contains(&c.name.as_str()))
            .collect())
    }

    /// Geocoded publisher addresses with book counts, most productive first.
    pub fn publication_sites(
        &self,
        filter: &MapFilter,
    ) -> Result<Vec<PublicationSite>, DomainError> {
        let (where_clause, bind) = map_where(None, filter)?;
        let sql = format!(
            "SELECT ol.address, ol.latitude, ol.longitude, COUNT(ol.mmsid) AS books_published \
             FROM ol_first_editions ol \
             JOIN translations tr ON ol.mmsid = tr.mmsid \
             {} \
             GROUP BY address, latitude, longitude \
             ORDER BY books_published DESC",
            where_clause
        );

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(bind.iter()), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<f64>>(1)?,
                row.get::<_, Option<f64>>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })?;
        let sites = rows.collect::<Result<Vec<_>, duckdb::Error>>()?;

        // Addresses the geocoder never resolved cannot land on the map.
        Ok(sites
            .into_iter()
            .filter_map(|(address, latitude, longitude, books_published)| {
                Some(PublicationSite {
                    address,
                    latitude: latitude?,
                    longitude: longitude?,
                    books_published,
                })
            })
            .collect())
    }

    /// The books behind one map marker.
    pub fn books_at_site(
        &self,
        address: &str,
        filter: &MapFilter,
    ) -> Result<Vec<SiteBook>, DomainError> {
        let (where_clause, bind) = map_where(Some(address), filter)?;
        let sql = format!(
            "SELECT ol.mmsid, ol.author, tr.title, ol.title, \
             CAST(ol.publish_year AS VARCHAR), ol.publish_places_all, ol.publish_places, \
             ol.publishers, tr.contributors::varchar, tr.subtitle, ol.address, ol.work_key \
             FROM ol_first_editions ol \
             JOIN translations tr ON ol.mmsid = tr.mmsid \
             {}",
            where_clause
        );

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(bind.iter()), |row| {
            Ok(SiteBook {
                mmsid: format!("Metadata?mmsid={}", row.get::<_, String>(0)?),
                author: row.get(1)?,
                title: row.get(2)?,
                original_title: row.get(3)?,
                publication_year: row.get(4)?,
                publish_places_all: row.get(5)?,
                publish_places: row.get(6)?,
                publishers: row.get(7)?,
                contributors: row.get(8)?,
                subtitle: row.get(9)?,
                address: row.get(10)?,
                work_link: row
                    .get::<_, Option<String>>(11)?
                    .map(|key| format!("{}{}", OPENLIBRARY_WEB, key)),
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, duckdb::Error>>()?)
    }
}

fn not_found_or(e: duckdb::Error) -> DomainError {
    match e {
        duckdb::Error::QueryReturnedNoRows => DomainError::NotFound,
        other => other.into(),
    }
}

fn read_translation(row: &duckdb::Row<'_>) -> Result<TranslationRecord, duckdb::Error> {
    Ok(TranslationRecord {
        mmsid: row.get(0)?,
        title: row.get(1)?,
        subtitle: row.get(2)?,
        main_author: row.get(3)?,
        translators: row.get(4)?,
        contributors: row.get(5)?,
        language: row.get(6)?,
        original_language: row.get(7)?,
        original_title: row.get(8)?,
        publisher: row.get(9)?,
        publication_year_int: row.get(10)?,
        publication_year_str: row.get(11)?,
        ddc: row.get(12)?,
        ddc800: row.get(13)?,
        ddc0: row.get(14)?,
        publish_year: row.get(15)?,
        urn: row.get(16)?,
    })
}

/// WHERE clause for the map views: an address restriction (exact marker
/// address, or any geocodable address), always the fiction flags, always a
/// year window, plus optional author/translator matches. The shared clause
/// strategies come from the predicate builder.
fn map_where(
    address: Option<&str>,
    filter: &MapFilter,
) -> Result<(String, Vec<BindValue>), DomainError> {
    let mut clauses: Vec<String> = Vec::new();
    let mut bind: Vec<BindValue> = Vec::new();

    match address {
        Some(address) => {
            clauses.push("address = ?".to_string());
            bind.push(BindValue::Text(address.to_string()));
        }
        None => clauses.push("address IS NOT NULL".to_string()),
    }

    let mut spec = FilterSpec::new();
    spec.push("ddc800", FilterValue::Flag(true));
    let (low, high) = filter.year_range.unwrap_or((1800, 2024));
    spec.push("publication_year_int", FilterValue::Range(low, high));
    if let Some(author) = filter.author.as_deref().filter(|a| !a.is_empty()) {
        spec.push("main_author", FilterValue::Text(author.to_string()));
    }
    if let Some(translator) = filter.translator.as_deref().filter(|t| !t.is_empty()) {
        spec.push("translators", FilterValue::Text(translator.to_string()));
    }

    if let Predicate::Where { sql, params } = build_predicate(&spec)? {
        clauses.push(sql);
        bind.extend(params);
    }

    Ok((format!("WHERE {}", clauses.join(" AND ")), bind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_where_always_restricts_to_fiction_and_address() {
        let (clause, bind) = map_where(None, &MapFilter::default()).unwrap();
        assert!(clause.contains("address IS NOT NULL"));
        assert!(clause.contains("(ddc800 IS TRUE OR ddc0 IS TRUE)"));
        assert!(clause.contains("(publication_year_int BETWEEN ? AND ?)"));
        assert_eq!(bind, vec![BindValue::Int(1800), BindValue::Int(2024)]);
    }

    #[test]
    fn map_where_pins_the_marker_address_first() {
        let filter = MapFilter {
            year_range: Some((1900, 1950)),
            author: Some("Hamsun".to_string()),
            translator: None,
        };
        let (clause, bind) = map_where(Some("Leipzig"), &filter).unwrap();
        assert!(clause.starts_with("WHERE address = ?"));
        assert!(clause.contains("(main_author ILIKE ?)"));
        assert_eq!(clause.matches('?').count(), bind.len());
        assert_eq!(bind[0], BindValue::Text("Leipzig".to_string()));
    }
}
