use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;

/// Platform keys understood by the catalog API. The empty string means "all".
pub const KNOWN_PLATFORMS: &[&str] = &[
    "pc",
    "steam",
    "epic-games-store",
    "ubisoft",
    "gog",
    "itchio",
    "ps4",
    "ps5",
    "xbox-one",
    "xbox-series-xs",
    "switch",
    "android",
    "ios",
    "vr",
    "battlenet",
    "origin",
    "drm-free",
    "xbox-360",
];

/// Giveaway type keys understood by the catalog API. The empty string means "all".
pub const KNOWN_TYPES: &[&str] = &["game", "loot", "beta", "dlc"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Date,
    Value,
    Popularity,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Date => "date",
            SortBy::Value => "value",
            SortBy::Popularity => "popularity",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(SortBy::Date),
            "value" => Ok(SortBy::Value),
            "popularity" => Ok(SortBy::Popularity),
            other => Err(ValidationError::UnknownSortBy(other.to_owned())),
        }
    }
}

/// Current filter and search selection. `Default` is the reset value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub platform: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sort_by: SortBy,
    pub search: String,
}

#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    criteria: FilterCriteria,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_platform(&mut self, platform: impl Into<String>) {
        self.criteria.platform = platform.into();
    }

    pub fn set_kind(&mut self, kind: impl Into<String>) {
        self.criteria.kind = kind.into();
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) {
        self.criteria.sort_by = sort_by;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.criteria.search = search.into();
    }

    pub fn reset_filters(&mut self) {
        debug!("resetting filters");
        self.criteria = FilterCriteria::default();
    }
}

/// Validated parameters for a list fetch. `None` means "no filter".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub platform: Option<String>,
    pub kind: Option<String>,
    pub sort_by: SortBy,
}

impl ListQuery {
    pub fn from_criteria(criteria: &FilterCriteria) -> Result<Self, ValidationError> {
        Ok(Self {
            platform: validate_platform(&criteria.platform)?,
            kind: validate_kind(&criteria.kind)?,
            sort_by: criteria.sort_by,
        })
    }

    /// Builds a query from untyped input, e.g. command line arguments.
    pub fn parse(platform: &str, kind: &str, sort_by: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            platform: validate_platform(platform)?,
            kind: validate_kind(kind)?,
            sort_by: sort_by.parse()?,
        })
    }
}

/// Validated parameters for a worth summary fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorthQuery {
    pub platform: Option<String>,
    pub kind: Option<String>,
}

impl WorthQuery {
    pub fn from_criteria(criteria: &FilterCriteria) -> Result<Self, ValidationError> {
        Self::parse(&criteria.platform, &criteria.kind)
    }

    pub fn parse(platform: &str, kind: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            platform: validate_platform(platform)?,
            kind: validate_kind(kind)?,
        })
    }
}

fn validate_platform(value: &str) -> Result<Option<String>, ValidationError> {
    match value {
        "" => Ok(None),
        v if KNOWN_PLATFORMS.contains(&v) => Ok(Some(v.to_owned())),
        other => Err(ValidationError::UnknownPlatform(other.to_owned())),
    }
}

fn validate_kind(value: &str) -> Result<Option<String>, ValidationError> {
    match value {
        "" => Ok(None),
        v if KNOWN_TYPES.contains(&v) => Ok(Some(v.to_owned())),
        other => Err(ValidationError::UnknownType(other.to_owned())),
    }
}
