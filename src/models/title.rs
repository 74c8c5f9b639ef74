use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::TitleId;

/// Kind of catalog entry a user can browse
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MediaKind {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "tv")]
    TvShow,
}

impl MediaKind {
    /// Path segment the metadata API uses for this kind
    pub fn path_segment(self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::TvShow => "tv",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Discriminator of a raw search record. The multi-search endpoint mixes
/// people and other kinds in with movies and shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKind {
    Movie,
    Tv,
    Person,
    Other(String),
}

impl RecordKind {
    pub fn parse(media_type: &str) -> Self {
        match media_type {
            "movie" => RecordKind::Movie,
            "tv" => RecordKind::Tv,
            "person" => RecordKind::Person,
            other => RecordKind::Other(other.to_string()),
        }
    }

    /// The browsable kind, if any
    pub fn media_kind(&self) -> Option<MediaKind> {
        match self {
            RecordKind::Movie => Some(MediaKind::Movie),
            RecordKind::Tv => Some(MediaKind::TvShow),
            RecordKind::Person | RecordKind::Other(_) => None,
        }
    }
}

/// A movie or TV show from the catalog. Immutable once received; consumers
/// hold their own clones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Title {
    pub id: TitleId,
    /// Movie title or show name
    pub display_name: String,
    pub media_kind: MediaKind,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    /// Release date for movies, first air date for shows
    pub air_date: Option<NaiveDate>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

impl Title {
    pub fn new(id: impl Into<TitleId>, display_name: impl Into<String>, media_kind: MediaKind) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            media_kind,
            overview: None,
            vote_average: None,
            vote_count: None,
            air_date: None,
            poster_path: None,
            backdrop_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Keyword {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Network {
    pub id: u64,
    pub name: String,
}

/// Full record of the primary title on a detail page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TitleDetails {
    pub title: Title,
    pub original_name: Option<String>,
    pub tagline: Option<String>,
    pub status: Option<String>,
    pub homepage: Option<String>,
    pub last_air_date: Option<NaiveDate>,
    pub genres: Vec<Genre>,
    pub production_companies: Vec<ProductionCompany>,
    pub networks: Vec<Network>,
}
