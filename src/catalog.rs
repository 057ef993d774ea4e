//! The closed vocabulary of guessable cities, keyed by normalized name.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const NAME_COLUMN: &str = "city";
const POPULATION_COLUMN: &str = "population_total";
const AREA_COLUMN: &str = "area_total_sq_mi";
const LATITUDE_COLUMN: &str = "latd";
const LONGITUDE_COLUMN: &str = "longd";

/// One city as supplied by the source table. Numeric fields that failed to
/// parse are carried as `None` and degrade to unknown hints downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityRecord {
    pub name: String,
    pub population_total: Option<u64>,
    pub area_total_sq_mi: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl CityRecord {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no city name column found in dataset")]
    MissingNameColumn,
    #[error("dataset contains no usable city rows")]
    EmptyDataset,
}

/// A raw row from the source table: column header -> trimmed field value.
pub type RawRow = HashMap<String, String>;

/// Key-normalization contract shared by the catalog, evaluator, and session:
/// trim surrounding whitespace, then lowercase.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Immutable-after-load city lookup. Names are kept sorted by their
/// normalized form so listings and seeded random draws are deterministic.
#[derive(Debug)]
pub struct CityCatalog {
    cities: HashMap<String, CityRecord>,
    names: Vec<String>,
}

impl CityCatalog {
    /// Builds the catalog from ordered raw rows. The city-name column is
    /// located by case-insensitive header match; rows with a blank name are
    /// dropped; on duplicate normalized names the last row wins.
    pub fn from_rows(rows: &[RawRow]) -> Result<Self, CatalogError> {
        if !rows
            .iter()
            .flat_map(|row| row.keys())
            .any(|key| key.trim().eq_ignore_ascii_case(NAME_COLUMN))
        {
            return Err(CatalogError::MissingNameColumn);
        }

        let mut cities = HashMap::new();
        for row in rows {
            let Some(name) = row
                .iter()
                .find(|(key, _)| key.trim().eq_ignore_ascii_case(NAME_COLUMN))
                .map(|(_, value)| value.trim())
            else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            cities.insert(normalize_name(name), record_from_row(name, row));
        }

        if cities.is_empty() {
            return Err(CatalogError::EmptyDataset);
        }

        let mut names: Vec<String> = cities.values().map(|c| c.name.clone()).collect();
        names.sort_by_key(|name| normalize_name(name));

        Ok(Self { cities, names })
    }

    /// Case-insensitive exact lookup. No fuzzy matching.
    pub fn lookup(&self, name: &str) -> Option<&CityRecord> {
        self.cities.get(&normalize_name(name))
    }

    /// Uniform draw over all cities. The catalog is non-empty by
    /// construction, so the draw always succeeds.
    pub fn random_city<R: Rng + ?Sized>(&self, rng: &mut R) -> &CityRecord {
        let name = &self.names[rng.gen_range(0..self.names.len())];
        &self.cities[&normalize_name(name)]
    }

    /// Canonical names in normalized order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Case-insensitive prefix filter for autocomplete. The prefix is taken
    /// as typed (lowercased, not trimmed, so "san " excludes Santa Ana).
    /// When nothing matches, the full list is returned so the picker never
    /// goes empty.
    pub fn names_with_prefix(&self, prefix: &str) -> Vec<String> {
        let needle = prefix.to_lowercase();
        let matches: Vec<String> = self
            .names
            .iter()
            .filter(|name| normalize_name(name).starts_with(&needle))
            .cloned()
            .collect();
        if matches.is_empty() {
            self.names.clone()
        } else {
            matches
        }
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

fn record_from_row(name: &str, row: &RawRow) -> CityRecord {
    CityRecord {
        name: name.to_string(),
        population_total: parse_field(row, POPULATION_COLUMN),
        area_total_sq_mi: parse_field(row, AREA_COLUMN),
        latitude: parse_field(row, LATITUDE_COLUMN),
        longitude: parse_field(row, LONGITUDE_COLUMN),
    }
}

fn parse_field<T: std::str::FromStr>(row: &RawRow, column: &str) -> Option<T> {
    row.get(column).and_then(|value| value.trim().parse().ok())
}
