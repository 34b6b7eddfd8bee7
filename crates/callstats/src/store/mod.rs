//! Call record store.
//!
//! This module provides the bounded, insertion-ordered collection of call
//! records along with loading, searching, removal, repricing and export.

pub mod format;

use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{OverflowPolicy, StoreConfig};
use crate::error::{Error, Result};
use crate::record::CallRecord;

/// Default maximum number of records held by a store.
pub const CAPACITY: usize = 20;

/// Bounded, ordered collection of call records.
///
/// Records keep insertion order. The store never holds more than its
/// capacity: single adds fail once full, bulk loads follow the configured
/// [`OverflowPolicy`].
#[derive(Debug, Clone)]
pub struct CallStore {
    /// Records in insertion order.
    records: Vec<CallRecord>,
    /// Maximum number of records.
    capacity: usize,
    /// What a bulk load does when the source holds more than fits.
    overflow: OverflowPolicy,
}

impl Default for CallStore {
    fn default() -> Self {
        Self::new(CAPACITY)
    }
}

impl CallStore {
    /// Create an empty store with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            capacity,
            overflow: OverflowPolicy::default(),
        }
    }

    /// Create an empty store from configuration.
    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.capacity).with_overflow(config.overflow)
    }

    /// Set the bulk load overflow policy.
    #[must_use]
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Maximum number of records.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check if the store is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    /// Number of free slots.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.records.len())
    }

    /// All records, in store order.
    #[must_use]
    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }

    /// Get the record at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CallRecord> {
        self.records.get(index)
    }

    /// Append already-parsed records, honoring capacity.
    ///
    /// Pre-existing records are kept. Under [`OverflowPolicy::Truncate`] the
    /// records that fit are appended and the rest are counted as skipped;
    /// under [`OverflowPolicy::Reject`] nothing is appended.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] when the records do not fit and the
    /// policy is [`OverflowPolicy::Reject`].
    pub fn load_records(&mut self, mut records: Vec<CallRecord>) -> Result<LoadReport> {
        let available = self.remaining();
        let requested = records.len();

        // Apply the overflow policy before touching the store
        let skipped = if requested > available {
            match self.overflow {
                OverflowPolicy::Reject => {
                    return Err(Error::CapacityExceeded {
                        capacity: self.capacity,
                        available,
                        requested,
                    });
                }
                OverflowPolicy::Truncate => {
                    records.truncate(available);
                    warn!(
                        "Store capacity {} reached; skipped {} records",
                        self.capacity,
                        requested - available
                    );
                    requested - available
                }
            }
        } else {
            0
        };

        // Everything left fits
        let loaded = records.len();
        self.records.extend(records);
        info!("Loaded {} call records ({} total)", loaded, self.len());

        Ok(LoadReport { loaded, skipped })
    }

    /// Bulk load records from a reader.
    ///
    /// The whole source is read and parsed before anything is appended, so
    /// a failed load leaves the store as it was.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails, the data is malformed, or the
    /// overflow policy rejects the load.
    pub fn bulk_load_from<R: Read>(&mut self, mut reader: R) -> Result<LoadReport> {
        // Read everything up front so a failed parse appends nothing
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        let records = format::parse_records(&input)?;
        self.load_records(records)
    }

    /// Bulk load records from a data file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileOpen`] if the file cannot be opened, otherwise
    /// the errors of [`CallStore::bulk_load_from`].
    pub fn bulk_load(&mut self, path: impl AsRef<Path>) -> Result<LoadReport> {
        let path = path.as_ref();
        debug!("Loading call records from {}", path.display());

        let file = File::open(path).map_err(|source| Error::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        self.bulk_load_from(file)
    }

    /// Price a new call and append it.
    ///
    /// Returns the index of the new record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreFull`] if the store is at capacity; the record
    /// is discarded.
    pub fn add(
        &mut self,
        phone_number: impl Into<String>,
        relay_stations: f64,
        length_minutes: f64,
    ) -> Result<usize> {
        let record = CallRecord::priced(phone_number, relay_stations, length_minutes);

        // Full store: the priced record is dropped
        if self.is_full() {
            warn!(
                "Store is full; discarding call record for {}",
                record.phone_number
            );
            return Err(Error::StoreFull {
                capacity: self.capacity,
            });
        }

        debug!("Adding call record for {}", record.phone_number);
        self.records.push(record);
        Ok(self.records.len() - 1)
    }

    /// Index of the first record for `phone_number`.
    #[must_use]
    pub fn search(&self, phone_number: &str) -> Option<usize> {
        self.records.iter().position(|r| r.matches(phone_number))
    }

    /// Indices of every record for `phone_number`, in store order.
    #[must_use]
    pub fn find_all(&self, phone_number: &str) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.matches(phone_number))
            .map(|(i, _)| i)
            .collect()
    }

    /// Every record for `phone_number`, in store order.
    pub fn matching<'a>(
        &'a self,
        phone_number: &'a str,
    ) -> impl Iterator<Item = &'a CallRecord> + 'a {
        self.records.iter().filter(move |r| r.matches(phone_number))
    }

    /// Remove every record for `phone_number`.
    ///
    /// Remaining records keep their relative order. Returns the number of
    /// records removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyStore`] if the store is empty, or
    /// [`Error::NotFound`] if no record matches. The store is unchanged in
    /// both cases.
    pub fn remove(&mut self, phone_number: &str) -> Result<usize> {
        if self.is_empty() {
            return Err(Error::EmptyStore);
        }

        // Stable pass: survivors keep their relative order
        let before = self.records.len();
        self.records.retain(|r| !r.matches(phone_number));
        let removed = before - self.records.len();

        if removed == 0 {
            return Err(Error::not_found(phone_number));
        }

        info!("Removed {} call records for {}", removed, phone_number);
        Ok(removed)
    }

    /// Reprice every record from its raw inputs.
    ///
    /// Returns the number of records processed. Running it again without
    /// changing raw inputs produces identical billing fields.
    pub fn recalculate_all(&mut self) -> usize {
        self.records = std::mem::take(&mut self.records)
            .into_iter()
            .map(CallRecord::reprice)
            .collect();
        info!("Processed {} call records", self.records.len());
        self.records.len()
    }

    /// Sum the records for `phone_number`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyStore`] if the store holds no records at all, or
    /// [`Error::NotFound`] if it holds records but none match.
    pub fn summarize(&self, phone_number: &str) -> Result<Totals> {
        if self.is_empty() {
            return Err(Error::EmptyStore);
        }

        let totals = self
            .matching(phone_number)
            .fold(Totals::new(phone_number), |totals, record| {
                totals.accumulate(record)
            });

        // Records exist, none for this number
        if totals.calls == 0 {
            return Err(Error::not_found(phone_number));
        }
        Ok(totals)
    }

    /// Write every record in export format.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn export_to<W: std::io::Write>(&self, writer: W) -> Result<usize> {
        format::write_export(writer, &self.records)
    }

    /// Write every record to an export file, replacing it if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileCreate`] if the file cannot be created, or an
    /// I/O error if writing fails.
    pub fn export_all(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::FileCreate {
            path: path.to_path_buf(),
            source,
        })?;

        // export_to flushes the buffer before returning
        let written = self.export_to(BufWriter::new(file))?;
        info!("Saved {} call records to {}", written, path.display());
        Ok(written)
    }
}

/// Outcome of a bulk load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records appended to the store.
    pub loaded: usize,
    /// Records dropped because the store was full.
    pub skipped: usize,
}

/// Sums over all records of one phone number.
///
/// The tax rate has no meaningful total and is not carried.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    /// The phone number summed over.
    pub phone_number: String,
    /// Number of matching records.
    pub calls: usize,
    /// Total relay stations.
    pub relay_stations: f64,
    /// Total minutes.
    pub length_minutes: f64,
    /// Total pre-tax cost.
    pub net_cost: f64,
    /// Total tax.
    pub call_tax: f64,
    /// Total cost including tax.
    pub total_cost: f64,
}

impl Totals {
    fn new(phone_number: &str) -> Self {
        Self {
            phone_number: phone_number.to_string(),
            calls: 0,
            relay_stations: 0.0,
            length_minutes: 0.0,
            net_cost: 0.0,
            call_tax: 0.0,
            total_cost: 0.0,
        }
    }

    fn accumulate(mut self, record: &CallRecord) -> Self {
        self.calls += 1;
        self.relay_stations += record.relay_stations;
        self.length_minutes += record.length_minutes;
        self.net_cost += record.net_cost;
        self.call_tax += record.call_tax;
        self.total_cost += record.total_cost;
        self
    }
}
