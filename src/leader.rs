use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Stands in for a missing birth date; never expected in page text.
pub const UNKNOWN_BIRTH_YEAR: &str = "9999";

/// Leader as returned by the leaders endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawLeader {
    #[serde(default)]
    pub wikipedia_url: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
}

impl RawLeader {
    pub fn wikipedia_url(&self) -> Option<&str> {
        self.wikipedia_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Year part of a `YYYY-MM-DD` birth date.
    pub fn birth_year(&self) -> &str {
        self.birth_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
            .unwrap_or(UNKNOWN_BIRTH_YEAR)
    }

    pub fn with_paragraph(self, wikipedia_url: String, first_paragraph: String) -> Leader {
        Leader {
            wikipedia_url,
            first_name: self.first_name,
            last_name: self.last_name,
            first_paragraph,
        }
    }
}

/// Leader record as written to the output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    pub wikipedia_url: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub first_paragraph: String,
}

/// Leaders keyed by country, kept in the order countries were inserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadersByCountry {
    entries: Vec<(String, Vec<Leader>)>,
}

impl LeadersByCountry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, country: String, leaders: Vec<Leader>) {
        match self.entries.iter_mut().find(|(key, _)| *key == country) {
            Some((_, existing)) => *existing = leaders,
            None => self.entries.push((country, leaders)),
        }
    }

    pub fn get(&self, country: &str) -> Option<&[Leader]> {
        self.entries
            .iter()
            .find(|(key, _)| key == country)
            .map(|(_, leaders)| leaders.as_slice())
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(country, _)| country.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Leader])> {
        self.entries
            .iter()
            .map(|(country, leaders)| (country.as_str(), leaders.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for LeadersByCountry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (country, leaders) in &self.entries {
            map.serialize_entry(country, leaders)?;
        }
        map.end()
    }
}

struct LeadersByCountryVisitor;

impl<'de> Visitor<'de> for LeadersByCountryVisitor {
    type Value = LeadersByCountry;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of country to leaders")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut data = LeadersByCountry::new();
        while let Some((country, leaders)) = access.next_entry::<String, Vec<Leader>>()? {
            data.insert(country, leaders);
        }
        Ok(data)
    }
}

impl<'de> Deserialize<'de> for LeadersByCountry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(LeadersByCountryVisitor)
    }
}
