//! Typed user table loaded from CSV.
//!
//! The loader looks up the `Age`, `Device` and `Country` columns by header
//! name once, then reads every row into a [`UserRecord`]. Other columns are
//! ignored. After loading, the table is immutable and the tests borrow it.
//!
//! # Example file content
//! ```csv
//! User ID,Subscription Type,Country,Age,Gender,Device
//! 1,Basic,United States,28,Male,Smartphone
//! 2,Premium,Canada,35,Female,Tablet
//! ```

use std::collections::BTreeSet;
use std::fs::File;
use std::io;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info};

use crate::error::{Error, Result};

pub const AGE: &str = "Age";
pub const DEVICE: &str = "Device";
pub const COUNTRY: &str = "Country";

/// One row of the user table.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub age: f64,
    pub device: String,
    pub country: String,
}

impl UserRecord {
    pub fn new(age: f64, device: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            age,
            device: device.into(),
            country: country.into(),
        }
    }
}

/// Ordered, read-only sequence of [`UserRecord`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<UserRecord>,
}

/// Header positions of the required columns.
struct Columns {
    age: usize,
    device: usize,
    country: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |field: &'static str| {
            headers
                .iter()
                .position(|h| h == field)
                .ok_or(Error::MissingField { field })
        };
        Ok(Self {
            age: find(AGE)?,
            device: find(DEVICE)?,
            country: find(COUNTRY)?,
        })
    }

    fn parse(&self, row: &StringRecord) -> Result<UserRecord> {
        let line = row.position().map_or(0, |p| p.line());
        let cell = |idx: usize, field: &'static str| {
            row.get(idx).ok_or_else(|| Error::InvalidValue {
                line,
                field,
                value: String::new(),
            })
        };

        let raw_age = cell(self.age, AGE)?;
        let age = raw_age
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite())
            .ok_or_else(|| Error::InvalidValue {
                line,
                field: AGE,
                value: raw_age.to_string(),
            })?;

        Ok(UserRecord {
            age,
            device: cell(self.device, DEVICE)?.to_string(),
            country: cell(self.country, COUNTRY)?.to_string(),
        })
    }
}

impl Dataset {
    pub fn from_records(records: Vec<UserRecord>) -> Self {
        Self { records }
    }

    /// Reads a CSV file with a header row.
    ///
    /// # Errors
    /// - [`Error::Io`] if the file cannot be opened.
    /// - [`Error::MissingField`] if `Age`, `Device` or `Country` is absent.
    /// - [`Error::InvalidValue`] if an `Age` cell is not a finite number.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let dataset = Self::from_reader(file)?;
        info!(path = %path.display(), rows = dataset.len(), "dataset loaded");
        Ok(dataset)
    }

    /// Reads CSV from any byte source. The first row must be the header.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let columns = Columns::locate(reader.headers()?)?;
        debug!(
            age = columns.age,
            device = columns.device,
            country = columns.country,
            "located required columns"
        );

        let mut records = Vec::new();
        for row in reader.records() {
            records.push(columns.parse(&row?)?);
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserRecord> {
        self.records.iter()
    }

    /// Ages of every record whose device equals `device` exactly, in file
    /// order.
    pub fn ages_for_device(&self, device: &str) -> Vec<f64> {
        self.records
            .iter()
            .filter(|r| r.device == device)
            .map(|r| r.age)
            .collect()
    }

    pub fn devices(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.device.as_str()).collect()
    }

    pub fn countries(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.country.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a UserRecord;
    type IntoIter = std::slice::Iter<'a, UserRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
