use serde::{Deserialize, Serialize};

/// One geocoded publisher address with the number of books first published
/// there, aggregated for the map view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicationSite {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub books_published: i64,
}

/// One book behind a map marker. Field names follow the display aliases of
/// the site drill-down table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteBook {
    /// Deep link into the per-book metadata view.
    pub mmsid: String,
    #[serde(rename = "forfatter")]
    pub author: Option<String>,
    #[serde(rename = "tittel")]
    pub title: Option<String>,
    #[serde(rename = "originaltittel")]
    pub original_title: Option<String>,
    #[serde(rename = "publikasjonsår")]
    pub publication_year: Option<String>,
    #[serde(rename = "publikasjonssteder_alle")]
    pub publish_places_all: Option<String>,
    #[serde(rename = "publikasjonssteder")]
    pub publish_places: Option<String>,
    #[serde(rename = "forlag")]
    pub publishers: Option<String>,
    #[serde(rename = "bidragsytere")]
    pub contributors: Option<String>,
    #[serde(rename = "undertittel")]
    pub subtitle: Option<String>,
    #[serde(rename = "adresse")]
    pub address: Option<String>,
    /// Deep link to the original work's record, when the key is known.
    #[serde(rename = "verksnøkkel")]
    pub work_link: Option<String>,
}
