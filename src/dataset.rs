use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::ideology::Ideology;

/// One row of the leader dataset: who governed in which ideology, per year.
///
/// `ideology` is lowercased once at load time. Callers compare against it
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderRecord {
    pub year: i32,

    #[serde(rename = "hog_ideology")]
    pub ideology: String,
}

impl LeaderRecord {
    pub fn new(year: i32, ideology: &str) -> Self {
        Self {
            year,
            ideology: ideology.to_lowercase(),
        }
    }
}

/// Raw CSV row. Only the two consumed columns are named; the rest of the
/// file is ignored by the deserializer.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "year")]
    year: i32,

    #[serde(rename = "hog_ideology")]
    hog_ideology: String,
}

/// The read-once, in-memory table plus where it came from.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<LeaderRecord>,

    /// Path or label of the source (for the summary endpoint)
    pub source: String,

    /// When the file was read
    pub loaded_at: DateTime<Utc>,

    /// SHA-256 of the raw bytes
    pub fingerprint: String,
}

// ============================================================================
// LOADING
// ============================================================================

/// Load the dataset from a CSV file on disk.
///
/// A missing file, a missing `year`/`hog_ideology` column or a non-integer
/// year all fail the load; there is nothing useful to serve without data.
pub fn load_csv(csv_path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    Dataset::from_reader(file, &csv_path.display().to_string())
}

impl Dataset {
    /// Build a dataset from any CSV byte stream.
    pub fn from_reader<R: Read>(mut reader: R, source: &str) -> Result<Self> {
        let mut raw = Vec::new();
        reader
            .read_to_end(&mut raw)
            .with_context(|| format!("Failed to read CSV data from {}", source))?;

        let fingerprint = format!("{:x}", Sha256::digest(&raw));

        // Cell values are kept as written; only lowercasing is applied
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(raw.as_slice());

        let mut records = Vec::new();
        for (index, result) in rdr.deserialize::<CsvRow>().enumerate() {
            // +2: header line, 1-based numbering
            let row = result.with_context(|| {
                format!("Failed to deserialize row {} of {}", index + 2, source)
            })?;
            records.push(LeaderRecord::new(row.year, &row.hog_ideology));
        }

        info!(source, records = records.len(), "dataset loaded");

        Ok(Self {
            records,
            source: source.to_string(),
            loaded_at: Utc::now(),
            fingerprint,
        })
    }

    /// Wrap already-built records (records are normalized again here).
    pub fn from_records(records: Vec<LeaderRecord>) -> Self {
        let records: Vec<LeaderRecord> = records
            .into_iter()
            .map(|r| LeaderRecord::new(r.year, &r.ideology))
            .collect();

        let mut hasher = Sha256::new();
        for r in &records {
            hasher.update(format!("{},{}\n", r.year, r.ideology));
        }

        Self {
            records,
            source: "<memory>".to_string(),
            loaded_at: Utc::now(),
            fingerprint: format!("{:x}", hasher.finalize()),
        }
    }

    pub fn records(&self) -> &[LeaderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last year present, if any.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }

    /// Row count per distinct ideology, recognized or not.
    pub fn ideology_totals(&self) -> BTreeMap<String, usize> {
        let mut totals = BTreeMap::new();
        for r in &self.records {
            *totals.entry(r.ideology.clone()).or_insert(0) += 1;
        }
        totals
    }

    /// Rows that no selector option will ever chart.
    pub fn unrecognized_count(&self) -> usize {
        let count = self
            .records
            .iter()
            .filter(|r| !Ideology::is_recognized(&r.ideology))
            .count();
        debug!(count, "unrecognized ideology rows");
        count
    }
}
