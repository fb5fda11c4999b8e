use duckdb::Connection;
use verden_pa_norsk::catalog::predicate::{FilterSpec, FilterValue};
use verden_pa_norsk::catalog::reshape::reshape;
use verden_pa_norsk::catalog::store::MapFilter;
use verden_pa_norsk::catalog::Catalog;
use verden_pa_norsk::domain::DomainError;

// Helper to build a small catalog fixture on disk. The store opens its
// connections read-only, so the fixture is written with a separate
// read-write connection first.
fn fixture_catalog(name: &str) -> Catalog {
    let path = std::env::temp_dir().join(format!(
        "verden_pa_norsk_fixture_{}_{}.db",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let conn = Connection::open(&path).expect("Failed to create fixture database");
    conn.execute_batch(
        r#"
        CREATE TABLE translations (
            mmsid VARCHAR,
            title VARCHAR,
            subtitle VARCHAR,
            main_author VARCHAR,
            translators VARCHAR[],
            contributors VARCHAR[],
            language VARCHAR,
            original_language VARCHAR,
            original_title VARCHAR,
            publisher VARCHAR,
            publication_year_int BIGINT,
            publication_year_str VARCHAR,
            ddc VARCHAR,
            ddc800 BOOLEAN,
            ddc0 BOOLEAN
        );
        CREATE TABLE ol_first_editions (
            mmsid VARCHAR,
            title VARCHAR,
            author VARCHAR,
            publish_year BIGINT,
            publishers VARCHAR,
            publish_places_all VARCHAR,
            publish_places VARCHAR,
            address VARCHAR,
            latitude DOUBLE,
            longitude DOUBLE,
            work_key VARCHAR
        );
        CREATE TABLE urn_mmsid (mmsid VARCHAR, urn VARCHAR);
        CREATE TABLE languages (language_code VARCHAR, language_nob VARCHAR);

        INSERT INTO translations VALUES
            ('1001', 'Peer Gynt: et skuespill', NULL, 'Ibsen, Henrik',
             ['Olsen, Kari'], ['Berg, Nils'], 'nob', 'dan', 'Peer Gynt',
             'Gyldendal', 1867, '1867', '839.822', true, false),
            ('1002', 'Sult', NULL, 'Hamsun, Knut',
             ['Nilsen, Per'], NULL, 'nno', 'eng', 'Hunger',
             'Aschehoug', 1890, '1890', '823', false, true),
            ('1003', 'Prosessen', 'roman', 'Kafka, Franz',
             ['Vik, Anna', 'Olsen, Kari'], NULL, 'nob', 'deu', 'Der Prozess',
             'Samlaget', 1933, '1933', NULL, false, false);

        INSERT INTO ol_first_editions VALUES
            ('1001', 'Peer Gynt', 'Henrik Ibsen', 1867, 'C. A. Reitzel',
             'København', 'København', 'København, Danmark', 55.6761, 12.5683,
             '/works/OL1W'),
            ('1003', 'Der Prozess', 'Franz Kafka', 1925, 'Verlag Die Schmiede',
             'Berlin', 'Berlin', 'Berlin, Tyskland', 52.52, 13.405,
             '/works/OL3W');

        INSERT INTO urn_mmsid VALUES
            ('1001', 'URN:NBN:no-nb_digibok_1001'),
            ('1003', 'URN:NBN:no-nb_digibok_1003');

        INSERT INTO languages VALUES
            ('dan', 'dansk'),
            ('deu', 'tysk'),
            ('eng', 'engelsk');
        "#,
    )
    .expect("Failed to populate fixture database");
    drop(conn);

    Catalog::new(path.to_string_lossy().into_owned())
}

#[test]
fn unrestricted_search_returns_the_whole_corpus() {
    let catalog = fixture_catalog("unrestricted");
    let records = catalog.search_translations(&FilterSpec::new()).unwrap();
    assert_eq!(records.len(), 3);
}

#[test]
fn author_substring_matches_case_insensitively() {
    let catalog = fixture_catalog("author");
    let mut spec = FilterSpec::new();
    spec.push("main_author", FilterValue::Text("ibsen".to_string()));
    let records = catalog.search_translations(&spec).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].mmsid, "1001");
    assert_eq!(records[0].publish_year, Some(1867));
    assert_eq!(records[0].urn.as_deref(), Some("URN:NBN:no-nb_digibok_1001"));
}

#[test]
fn translator_match_sees_every_list_element() {
    let catalog = fixture_catalog("translator");
    let mut spec = FilterSpec::new();
    spec.push("translators", FilterValue::Text("Olsen".to_string()));
    let mut mmsids: Vec<String> = catalog
        .search_translations(&spec)
        .unwrap()
        .into_iter()
        .map(|r| r.mmsid)
        .collect();
    mmsids.sort();
    // 'Olsen, Kari' is the sole translator of 1001 and the second of 1003.
    assert_eq!(mmsids, vec!["1001".to_string(), "1003".to_string()]);
}

#[test]
fn year_range_is_inclusive_at_both_bounds() {
    let catalog = fixture_catalog("years");
    let mut spec = FilterSpec::new();
    spec.push("publication_year_int", FilterValue::Range(1867, 1890));
    let records = catalog.search_translations(&spec).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn language_set_widens_to_an_in_list() {
    let catalog = fixture_catalog("languages");
    let mut spec = FilterSpec::new();
    spec.push(
        "original_language",
        FilterValue::Terms(vec!["dan".to_string(), "deu".to_string()]),
    );
    let records = catalog.search_translations(&spec).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn fiction_flag_reaches_records_without_a_dewey_code() {
    let catalog = fixture_catalog("fiction");
    let mut spec = FilterSpec::new();
    spec.push("ddc800", FilterValue::Flag(true));
    let mut mmsids: Vec<String> = catalog
        .search_translations(&spec)
        .unwrap()
        .into_iter()
        .map(|r| r.mmsid)
        .collect();
    mmsids.sort();
    // 1001 through ddc800, 1002 through ddc0; 1003 has neither flag.
    assert_eq!(mmsids, vec!["1001".to_string(), "1002".to_string()]);
}

#[test]
fn search_results_reshape_into_the_display_table() {
    let catalog = fixture_catalog("reshape");
    let records = catalog.search_translations(&FilterSpec::new()).unwrap();
    let table = reshape(records, "https://urn.nb.no").unwrap();

    assert_eq!(table.rows.len(), 3);
    // Ascending by translation year.
    assert_eq!(table.rows[0]["mmsid"], serde_json::json!("Metadata?mmsid=1001"));
    assert_eq!(
        table.rows[0]["urn"],
        serde_json::json!("https://urn.nb.no/URN:NBN:no-nb_digibok_1001")
    );
    // 1002 has no persistent identifier.
    assert_eq!(table.rows[1]["urn"], serde_json::Value::Null);
    assert_eq!(
        table.rows[0]["lenker"],
        serde_json::json!("Omtaler?author=Henrik%20Ibsen&title=Peer%20Gynt&publication_year=1867")
    );
}

#[test]
fn get_book_pairs_the_translation_with_its_original_edition() {
    let catalog = fixture_catalog("book");
    let (translation, edition) = catalog.get_book("1001").unwrap();
    assert_eq!(translation.title.as_deref(), Some("Peer Gynt: et skuespill"));
    let edition = edition.unwrap();
    assert_eq!(edition.author.as_deref(), Some("Henrik Ibsen"));
    assert_eq!(edition.address.as_deref(), Some("København, Danmark"));

    // 1002 was never matched to an original edition.
    let (_, edition) = catalog.get_book("1002").unwrap();
    assert!(edition.is_none());
}

#[test]
fn unknown_mmsid_is_not_found() {
    let catalog = fixture_catalog("missing");
    assert!(matches!(
        catalog.get_book("9999"),
        Err(DomainError::NotFound)
    ));
}

#[test]
fn available_languages_are_distinct_and_ordered_by_name() {
    let catalog = fixture_catalog("langlist");
    let languages = catalog.available_languages().unwrap();
    let names: Vec<String> = languages.into_iter().map(|l| l.name).collect();
    assert_eq!(names, vec!["dansk", "engelsk", "tysk"]);
}

#[test]
fn filterable_columns_hide_the_unexposed_fields() {
    let catalog = fixture_catalog("columns");
    let columns = catalog.filterable_columns().unwrap();
    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    assert!(names.contains(&"main_author"));
    assert!(names.contains(&"publication_year_int"));
    for hidden in ["mmsid", "ddc", "publication_year_str", "ddc0", "contributors", "subtitle"] {
        assert!(!names.contains(&hidden), "{} should be hidden", hidden);
    }
}

#[test]
fn publication_sites_aggregate_fiction_titles_by_address() {
    let catalog = fixture_catalog("sites");
    let sites = catalog.publication_sites(&MapFilter::default()).unwrap();
    // 1003 carries neither fiction flag, so only Peer Gynt's site remains.
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].address, "København, Danmark");
    assert_eq!(sites[0].books_published, 1);
}

#[test]
fn books_at_site_link_back_to_metadata_and_the_original_work() {
    let catalog = fixture_catalog("sitebooks");
    let filter = MapFilter {
        year_range: Some((1800, 2024)),
        author: None,
        translator: None,
    };
    let books = catalog.books_at_site("København, Danmark", &filter).unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].mmsid, "Metadata?mmsid=1001");
    assert_eq!(
        books[0].work_link.as_deref(),
        Some("https://www.openlibrary.org/works/OL1W")
    );
}
