use serde::{Deserialize, Serialize};

/// Original-edition metadata keyed by the same catalog identifier as the
/// translation, including the geocoded publisher address used by the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginalEdition {
    pub mmsid: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publish_year: Option<i64>,
    pub publishers: Option<String>,
    pub publish_places_all: Option<String>,
    pub publish_places: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub work_key: Option<String>,
}
