use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FetchError;

const WIRE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SHORT_DESCRIPTION_CHARS: usize = 160;

/// Canonical giveaway identifier.
///
/// The remote API is not consistent about ids (numbers in payloads, strings in
/// query parameters and route params), so every id is normalised to a `u64`
/// when it crosses the wire boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GiveawayId(pub u64);

impl fmt::Display for GiveawayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GiveawayId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(GiveawayId)
    }
}

impl From<u64> for GiveawayId {
    fn from(value: u64) -> Self {
        GiveawayId(value)
    }
}

impl<'de> Deserialize<'de> for GiveawayId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum WireId {
            Number(u64),
            Text(String),
        }

        match WireId::deserialize(deserializer)? {
            WireId::Number(n) => Ok(GiveawayId(n)),
            WireId::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Estimated value of a giveaway: either a plain number or a display label
/// such as `"$29.99"` or `"N/A"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Worth {
    Amount(f64),
    Label(String),
}

impl Default for Worth {
    fn default() -> Self {
        Worth::Label("N/A".to_owned())
    }
}

impl Worth {
    /// Numeric value in USD, if the worth carries one.
    pub fn amount(&self) -> Option<f64> {
        match self {
            Worth::Amount(value) => Some(*value),
            Worth::Label(label) => parse_usd(label),
        }
    }
}

impl fmt::Display for Worth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Worth::Amount(value) => write!(f, "${value:.2}"),
            Worth::Label(label) => f.write_str(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiveawaySummary {
    pub id: GiveawayId,
    pub title: String,
    pub thumbnail: String,
    pub platforms: Vec<String>,
    pub worth: Worth,
    #[serde(rename = "type")]
    pub kind: String,
    pub end_date: Option<NaiveDateTime>,
    pub short_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiveawayDetail {
    #[serde(flatten)]
    pub summary: GiveawaySummary,
    pub description: String,
    pub instructions: String,
    pub claim_url: String,
    pub image: String,
    pub published_date: Option<NaiveDateTime>,
    pub users: Option<u64>,
    pub status: String,
    pub gamerpower_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorthSummary {
    pub total_usd: f64,
    pub active_count: u32,
}

/// Giveaway object as served by the catalog API. Both the list and the
/// detail endpoint return this shape.
#[derive(Debug, Deserialize)]
pub(crate) struct WireGiveaway {
    id: GiveawayId,
    title: String,
    #[serde(default)]
    worth: Worth,
    #[serde(default)]
    thumbnail: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    instructions: String,
    #[serde(default)]
    open_giveaway_url: String,
    #[serde(default)]
    published_date: Option<String>,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default, deserialize_with = "platforms_from_wire")]
    platforms: Vec<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    users: Option<u64>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    gamerpower_url: String,
}

impl WireGiveaway {
    fn summary(&self) -> GiveawaySummary {
        GiveawaySummary {
            id: self.id,
            title: self.title.clone(),
            thumbnail: self.thumbnail.clone(),
            platforms: self.platforms.clone(),
            worth: self.worth.clone(),
            kind: self.kind.clone(),
            end_date: self.end_date.as_deref().and_then(parse_wire_date),
            short_description: shorten(&self.description),
        }
    }

    pub(crate) fn into_summary(self) -> GiveawaySummary {
        self.summary()
    }

    pub(crate) fn into_detail(self) -> GiveawayDetail {
        let summary = self.summary();
        GiveawayDetail {
            summary,
            published_date: self.published_date.as_deref().and_then(parse_wire_date),
            description: self.description,
            instructions: self.instructions,
            claim_url: self.open_giveaway_url,
            image: self.image,
            users: self.users,
            status: self.status.unwrap_or_default(),
            gamerpower_url: self.gamerpower_url,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireAmount {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireWorth {
    active_giveaways_number: u32,
    worth_estimation_usd: WireAmount,
}

impl TryFrom<WireWorth> for WorthSummary {
    type Error = FetchError;

    fn try_from(wire: WireWorth) -> Result<Self, Self::Error> {
        let total_usd = match wire.worth_estimation_usd {
            WireAmount::Number(value) => value,
            WireAmount::Text(text) => parse_usd(&text).ok_or_else(|| {
                FetchError::InvalidResponse(format!("unparseable worth estimation `{text}`"))
            })?,
        };
        Ok(WorthSummary {
            total_usd,
            active_count: wire.active_giveaways_number,
        })
    }
}

/// Accepts `"PC, Steam"` as well as `["PC", "Steam"]`.
fn platforms_from_wire<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WirePlatforms {
        Joined(String),
        List(Vec<String>),
    }

    let platforms = match WirePlatforms::deserialize(deserializer)? {
        WirePlatforms::Joined(joined) => joined.split(',').map(str::to_owned).collect(),
        WirePlatforms::List(list) => list,
    };
    Ok(platforms
        .into_iter()
        .map(|p| p.trim().to_owned())
        .filter(|p| !p.is_empty())
        .collect())
}

fn parse_wire_date(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), WIRE_DATE_FORMAT).ok()
}

fn parse_usd(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse().ok()
}

fn shorten(description: &str) -> String {
    let trimmed = description.trim();
    if trimmed.chars().count() <= SHORT_DESCRIPTION_CHARS {
        return trimmed.to_owned();
    }
    let mut short: String = trimmed.chars().take(SHORT_DESCRIPTION_CHARS).collect();
    short.truncate(short.trim_end().len());
    short.push_str("...");
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_giveaway_normalises_platforms_dates_and_ids() {
        let raw = r#"{
            "id": "525",
            "title": "Alpha Quest (Epic Games) Giveaway",
            "worth": "$19.99",
            "thumbnail": "https://www.gamerpower.com/offers/1/525.jpg",
            "description": "Grab it now.",
            "type": "Game",
            "platforms": "PC, Epic Games Store",
            "end_date": "N/A"
        }"#;
        let wire: WireGiveaway = serde_json::from_str(raw).unwrap();
        let summary = wire.into_summary();

        assert_eq!(summary.id, GiveawayId(525));
        assert_eq!(summary.platforms, vec!["PC", "Epic Games Store"]);
        assert_eq!(summary.end_date, None);
        assert_eq!(summary.worth.amount(), Some(19.99));
        assert_eq!(summary.short_description, "Grab it now.");
    }

    #[test]
    fn wire_date_is_parsed() {
        let parsed = parse_wire_date("2024-11-07 23:59:00").unwrap();
        assert_eq!(parsed.to_string(), "2024-11-07 23:59:00");
    }

    #[test]
    fn worth_estimation_strips_thousands_separators() {
        let wire: WireWorth = serde_json::from_str(
            r#"{"active_giveaways_number": 118, "worth_estimation_usd": "1,058.12"}"#,
        )
        .unwrap();
        let worth = WorthSummary::try_from(wire).unwrap();
        assert_eq!(worth.active_count, 118);
        assert!((worth.total_usd - 1058.12).abs() < f64::EPSILON);
    }

    #[test]
    fn long_descriptions_are_shortened() {
        let long = "x".repeat(400);
        let short = shorten(&long);
        assert_eq!(short.chars().count(), SHORT_DESCRIPTION_CHARS + 3);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn n_a_worth_has_no_amount() {
        assert_eq!(Worth::default().amount(), None);
    }
}
