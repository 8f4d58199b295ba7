use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;

use super::model::FeatureColumns;

// ---------------------------------------------------------------------------
// Feature list
// ---------------------------------------------------------------------------

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).context("opening JSON file")?;
    serde_json::from_reader(BufReader::new(file)).context("parsing JSON")
}

/// Expected JSON: `["Rooms", "Bathrooms", ..., "Location_Ampang", ...]`
pub fn load_feature_columns(path: &Path) -> Result<FeatureColumns> {
    let names: Vec<String> = read_json(path)?;
    if names.is_empty() {
        bail!("feature list is empty");
    }
    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            bail!("feature '{name}' is listed twice");
        }
    }
    Ok(FeatureColumns::new(names))
}

// ---------------------------------------------------------------------------
// CSV datasets
// ---------------------------------------------------------------------------

/// A CSV dataset held as read: header plus raw records.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    pub headers: Vec<String>,
    pub records: Vec<csv::StringRecord>,
}

impl ReferenceTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// CSV layout: header row with column names, one listing per row.
pub fn load_csv(path: &Path) -> Result<ReferenceTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let records = reader
        .records()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect::<Result<Vec<_>>>()?;

    Ok(ReferenceTable { headers, records })
}
