//! Predicate construction for corpus searches.
//!
//! A sparse, ordered set of user-supplied filters becomes one parameterized
//! WHERE predicate plus its bind list. Every clause keeps its `?`
//! placeholders aligned with the parameter order; the count of placeholders
//! in the emitted text always equals the length of the bind list.

use crate::domain::DomainError;
use duckdb::types::ToSqlOutput;
use duckdb::ToSql;

/// Raw filter input for one column. Scalars are normalized to one-element
/// sequences during clause construction so scalar and multi-value input
/// share one code path.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Checkbox-style assertion.
    Flag(bool),
    /// Single free-text value.
    Text(String),
    /// Multi-select term set.
    Terms(Vec<String>),
    /// Inclusive integer range.
    Range(i64, i64),
}

/// Ordered column → value mapping, built fresh per request. Clause order
/// follows insertion order, which keeps the emitted predicate deterministic
/// for identical input.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    entries: Vec<(String, FilterValue)>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, value: FilterValue) {
        self.entries.push((column.into(), value));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(String, FilterValue)] {
        &self.entries
    }
}

/// How one column's filter input becomes condition text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseStrategy {
    /// Scalar identity: `col = ?`, widening to `col IN (?, …)` sized to the
    /// input when several values are given.
    Exact,
    /// Inclusive bounds: `(col BETWEEN ? AND ?)`.
    YearRange,
    /// Case-insensitive substring, OR'd once per value: `(col ILIKE ? OR …)`.
    Substring,
    /// Substring against a multi-value column, cast to text first so the
    /// match sees every stored element: `(col::varchar ILIKE ? OR …)`.
    ListSubstring,
    /// The fiction checkbox: asserted true widens to an OR across both
    /// physical flags, since a record qualifies through either.
    FictionFlag,
}

/// Every selectable column and its strategy. Selectable columns are the
/// store's own schema, so an unlisted column is a configuration error caught
/// before any SQL is emitted, not a user-input error.
const COLUMN_STRATEGIES: &[(&str, ClauseStrategy)] = &[
    ("main_author", ClauseStrategy::Substring),
    ("title", ClauseStrategy::Substring),
    ("original_title", ClauseStrategy::Substring),
    ("publisher", ClauseStrategy::Substring),
    ("translators", ClauseStrategy::ListSubstring),
    ("contributors", ClauseStrategy::ListSubstring),
    ("language", ClauseStrategy::Exact),
    ("original_language", ClauseStrategy::Exact),
    ("publication_year_int", ClauseStrategy::YearRange),
    ("ddc800", ClauseStrategy::FictionFlag),
];

pub fn strategy_for(column: &str) -> Result<ClauseStrategy, DomainError> {
    COLUMN_STRATEGIES
        .iter()
        .find(|(name, _)| *name == column)
        .map(|(_, strategy)| *strategy)
        .ok_or_else(|| {
            DomainError::Configuration(format!("no clause strategy for column '{}'", column))
        })
}

/// One bind parameter for the analytical store.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Int(i64),
}

impl ToSql for BindValue {
    fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
        match self {
            BindValue::Text(s) => s.to_sql(),
            BindValue::Int(i) => i.to_sql(),
        }
    }
}

/// Built predicate. `Unrestricted` is the sentinel for "no restriction";
/// callers issue the unconditional query instead of a zero-clause WHERE.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Unrestricted,
    Where { sql: String, params: Vec<BindValue> },
}

pub fn build_predicate(spec: &FilterSpec) -> Result<Predicate, DomainError> {
    if spec.is_empty() {
        return Ok(Predicate::Unrestricted);
    }

    // Resolve every strategy up front so a misconfigured column fails before
    // any clause text exists.
    let resolved = spec
        .entries()
        .iter()
        .map(|(column, value)| strategy_for(column).map(|s| (column.as_str(), value, s)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut clauses: Vec<String> = Vec::new();
    let mut params: Vec<BindValue> = Vec::new();

    for (column, value, strategy) in resolved {
        match strategy {
            ClauseStrategy::FictionFlag => match value {
                FilterValue::Flag(true) => {
                    clauses.push("(ddc800 IS TRUE OR ddc0 IS TRUE)".to_string());
                }
                // An unasserted flag restricts nothing.
                FilterValue::Flag(false) => {}
                _ => return Err(shape_error(column, value)),
            },
            ClauseStrategy::YearRange => match value {
                FilterValue::Range(low, high) => {
                    clauses.push(format!("({} BETWEEN ? AND ?)", column));
                    params.push(BindValue::Int(*low));
                    params.push(BindValue::Int(*high));
                }
                _ => return Err(shape_error(column, value)),
            },
            ClauseStrategy::Exact => {
                let terms = text_terms(column, value)?;
                if terms.len() == 1 {
                    clauses.push(format!("{} = ?", column));
                } else {
                    let placeholders = vec!["?"; terms.len()].join(", ");
                    clauses.push(format!("{} IN ({})", column, placeholders));
                }
                params.extend(terms.into_iter().map(BindValue::Text));
            }
            ClauseStrategy::Substring => {
                let terms = text_terms(column, value)?;
                clauses.push(or_set(column, "", terms.len()));
                params.extend(terms.into_iter().map(|t| BindValue::Text(wildcard(&t))));
            }
            ClauseStrategy::ListSubstring => {
                let terms = text_terms(column, value)?;
                clauses.push(or_set(column, "::varchar", terms.len()));
                params.extend(terms.into_iter().map(|t| BindValue::Text(wildcard(&t))));
            }
        }
    }

    if clauses.is_empty() {
        return Ok(Predicate::Unrestricted);
    }

    Ok(Predicate::Where {
        sql: clauses.join(" AND "),
        params,
    })
}

/// Normalize a scalar or multi-value text input to a non-empty term list.
fn text_terms(column: &str, value: &FilterValue) -> Result<Vec<String>, DomainError> {
    match value {
        FilterValue::Text(text) => Ok(vec![text.clone()]),
        FilterValue::Terms(terms) if !terms.is_empty() => Ok(terms.clone()),
        FilterValue::Terms(_) => Err(DomainError::Validation(format!(
            "empty term set for column '{}'",
            column
        ))),
        _ => Err(shape_error(column, value)),
    }
}

fn or_set(column: &str, cast: &str, count: usize) -> String {
    let comparisons = vec![format!("{}{} ILIKE ?", column, cast); count];
    format!("({})", comparisons.join(" OR "))
}

fn wildcard(term: &str) -> String {
    format!("%{}%", term)
}

fn shape_error(column: &str, value: &FilterValue) -> DomainError {
    DomainError::Validation(format!(
        "filter value {:?} does not fit column '{}'",
        value, column
    ))
}
