use serde::{Deserialize, Serialize};

/// One page of the `bibs.json` listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BnPage {
    /// Cursor of the following page. Empty on the last page.
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub bibs: Vec<BnBib>,
}

/// A bibliographic record as the National Library publishes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BnBib {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub publication_year: Option<String>,
    pub language: Option<String>,
    pub isbn_issn: Option<String>,
    pub domain: Option<String>,
    pub genre: Option<String>,
    pub kind: Option<String>,
}
