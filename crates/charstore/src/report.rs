//! Gender summary over a set of records.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::record::{Character, Gender};

/// Number of records per gender.
///
/// Every gender is always present, so zero counts show up in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GenderCounts {
    counts: BTreeMap<Gender, usize>,
}

impl GenderCounts {
    /// Count the genders of `records`.
    #[must_use]
    pub fn from_records(records: &[Character]) -> Self {
        let mut counts: BTreeMap<Gender, usize> = Gender::ALL.iter().map(|&g| (g, 0)).collect();
        for record in records {
            *counts.entry(record.gender).or_default() += 1;
        }
        Self { counts }
    }

    /// Count for a single gender.
    #[must_use]
    pub fn get(&self, gender: Gender) -> usize {
        self.counts.get(&gender).copied().unwrap_or_default()
    }

    /// Total number of records counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterate over `(gender, count)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Gender, usize)> + '_ {
        self.counts.iter().map(|(&g, &n)| (g, n))
    }

    /// Render the counts as a boxed text table.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "┌────────────┬───────┐");
        let _ = writeln!(out, "│ GENDER     │ COUNT │");
        let _ = writeln!(out, "├────────────┼───────┤");
        for (gender, count) in self.iter() {
            let _ = writeln!(out, "│ {:<10} │ {count:>5} │", gender.name());
        }
        let _ = writeln!(out, "├────────────┼───────┤");
        let _ = writeln!(out, "│ {:<10} │ {:>5} │", "TOTAL", self.total());
        let _ = writeln!(out, "└────────────┴───────┘");
        out
    }

    /// Write the report to `dir` as `gender_stats_<timestamp>.txt`.
    ///
    /// Returns the path of the written file.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or the file cannot be created.
    pub fn save_to(&self, dir: &Path, now: NaiveDateTime) -> Result<PathBuf> {
        fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreate {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(format!("gender_stats_{}.txt", now.format("%Y%m%d_%H%M%S")));
        let mut body = String::new();
        let _ = writeln!(body, "CHARACTER GENDER STATISTICS");
        let _ = writeln!(body, "Generated: {}", now.format("%Y-%m-%d %H:%M:%S"));
        let _ = writeln!(body);
        body.push_str(&self.render());
        let _ = writeln!(body);
        let _ = writeln!(body, "Total characters: {}", self.total());

        fs::write(&path, body).map_err(|source| Error::FileWrite {
            path: path.clone(),
            source,
        })?;
        info!("Saved gender report to {}", path.display());
        Ok(path)
    }
}
