use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

pub mod title;

pub use title::{
    Genre, Keyword, MediaKind, Network, ProductionCompany, RecordKind, Title, TitleDetails,
};

/// Catalog identifier, unique within the metadata API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TitleId(pub u64);

impl From<u64> for TitleId {
    fn from(id: u64) -> Self {
        TitleId(id)
    }
}

impl Display for TitleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Metadata API Types
// ============================================================================

/// The API sends dates as `YYYY-MM-DD`, and sometimes as `""` or `null`
fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Envelope of every list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPage<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Heterogeneous record from search and recommendation endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRecord {
    pub id: u64,
    #[serde(default)]
    pub media_type: Option<String>,
    /// Movies carry `title`
    #[serde(default)]
    pub title: Option<String>,
    /// Shows and people carry `name`
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub first_air_date: Option<NaiveDate>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

impl ApiRecord {
    /// Kind of record; records without a discriminator are treated as `kind`
    pub fn kind_or(&self, kind: MediaKind) -> RecordKind {
        match &self.media_type {
            Some(media_type) => RecordKind::parse(media_type),
            None => RecordKind::parse(kind.path_segment()),
        }
    }

    /// Builds the domain title, or `None` for kinds that cannot be browsed
    pub fn into_title(self, kind: RecordKind) -> Option<Title> {
        kind.media_kind().map(|media_kind| self.into_title_of(media_kind))
    }

    fn into_title_of(self, media_kind: MediaKind) -> Title {
        let display_name = self.title.or(self.name).unwrap_or_default();
        let air_date = match media_kind {
            MediaKind::Movie => self.release_date.or(self.first_air_date),
            MediaKind::TvShow => self.first_air_date.or(self.release_date),
        };

        Title {
            id: TitleId(self.id),
            display_name,
            media_kind,
            overview: self.overview,
            vote_average: self.vote_average,
            vote_count: self.vote_count,
            air_date,
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
        }
    }
}

/// Keyword payload; movies answer with `keywords`, shows with `results`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeywords {
    #[serde(default)]
    pub keywords: Option<Vec<Keyword>>,
    #[serde(default)]
    pub results: Option<Vec<Keyword>>,
}

impl ApiKeywords {
    pub fn into_keywords(self) -> Vec<Keyword> {
        self.keywords.or(self.results).unwrap_or_default()
    }
}

/// Payload of `GET /{kind}/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiTitleDetails {
    #[serde(flatten)]
    pub record: ApiRecord,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub last_air_date: Option<NaiveDate>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub networks: Vec<Network>,
}

impl ApiTitleDetails {
    pub fn into_details(self, kind: MediaKind) -> TitleDetails {
        let original_name = self.original_title.or(self.original_name);

        TitleDetails {
            title: self.record.into_title_of(kind),
            original_name,
            tagline: self.tagline.filter(|t| !t.is_empty()),
            status: self.status,
            homepage: self.homepage.filter(|h| !h.is_empty()),
            last_air_date: self.last_air_date,
            genres: self.genres,
            production_companies: self.production_companies,
            networks: self.networks,
        }
    }
}
