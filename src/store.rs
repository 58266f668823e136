//! Persistence for the append-only collection of records.
//!
//! Callers go through the [RecordStore] trait and never touch the backing
//! file directly. [CsvStore] keeps the whole collection in one CSV file and
//! rewrites that file in full on every append.

use std::{
    ffi::OsString,
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    record::{Kind, Record, parse_date},
};

/// Loads and appends records.
///
/// There is no update or delete: once appended, a record stays as it is.
pub trait RecordStore {
    /// Load every record in insertion order.
    fn load(&self) -> Result<Vec<Record>, Error>;

    /// Add `record` after the existing records, persist the result and
    /// return the updated collection.
    fn append(&mut self, record: Record) -> Result<Vec<Record>, Error>;
}

/// A record store shared between request handlers.
///
/// Holding the lock for a whole [RecordStore::append] serialises the
/// load-modify-store sequence within this process. Writers in other processes
/// are not accounted for.
pub type SharedStore = Arc<Mutex<dyn RecordStore + Send>>;

/// A [RecordStore] backed by a single CSV file with the header
/// `Date,Item,Category,Type,Amount`.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Create a store for the CSV file at `path`.
    ///
    /// The file does not need to exist yet, it is created on the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for CsvStore {
    fn load(&self) -> Result<Vec<Record>, Error> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    "No record store at {}, starting with an empty collection",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(error) => {
                tracing::error!("could not open {}: {error}", self.path.display());
                return Err(Error::ReadFailure(format!(
                    "{}: {error}",
                    self.path.display()
                )));
            }
        };

        read_records(file)
            .inspect_err(|error| tracing::error!("could not load {}: {error}", self.path.display()))
    }

    fn append(&mut self, record: Record) -> Result<Vec<Record>, Error> {
        let mut records = self.load()?;
        records.push(record);
        write_records(&self.path, &records)?;

        tracing::debug!(
            "Wrote {} records to {}",
            records.len(),
            self.path.display()
        );

        Ok(records)
    }
}

/// A record as it is laid out in the CSV file.
///
/// Dates and amounts are kept as text here so that a bad value can be
/// reported with its line number instead of as a generic CSV error.
#[derive(Debug, Serialize, Deserialize)]
struct StoredRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Item", default)]
    item: String,
    #[serde(rename = "Category", default)]
    category: String,
    #[serde(rename = "Type")]
    kind: Kind,
    #[serde(rename = "Amount")]
    amount: String,
}

impl From<&Record> for StoredRecord {
    fn from(record: &Record) -> Self {
        Self {
            date: record.date.to_string(),
            item: record.item.clone(),
            category: record.category.clone(),
            kind: record.kind,
            amount: record.amount.to_string(),
        }
    }
}

impl StoredRecord {
    fn into_record(self, line: u64) -> Result<Record, Error> {
        let date = parse_date(&self.date).ok_or_else(|| Error::MalformedDate {
            line,
            value: self.date.clone(),
        })?;

        let amount = self
            .amount
            .trim()
            .parse()
            .map_err(|_| Error::MalformedAmount {
                line,
                value: self.amount.clone(),
            })?;

        Ok(Record {
            date,
            item: self.item,
            category: self.category,
            kind: self.kind,
            amount,
        })
    }
}

/// Read every record from CSV data that starts with a header row.
///
/// Empty input is an empty collection. Any row that cannot be read fails
/// the whole read.
fn read_records(reader: impl io::Read) -> Result<Vec<Record>, Error> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|position| position.line()).unwrap_or(0);

        let stored: StoredRecord = row
            .deserialize(Some(&headers))
            .map_err(|error| Error::CorruptStore {
                line,
                reason: error.to_string(),
            })?;

        records.push(stored.into_record(line)?);
    }

    Ok(records)
}

/// Replace the file at `path` with `records`.
///
/// The records are written to a sibling temporary file first which is then
/// renamed over `path`, so a failed write leaves the old file untouched.
fn write_records(path: &Path, records: &[Record]) -> Result<(), Error> {
    let temporary_path = temporary_path_for(path);

    let write = || -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_path(&temporary_path)?;

        for record in records {
            writer.serialize(StoredRecord::from(record))?;
        }

        writer.flush()?;
        Ok(())
    };

    if let Err(error) = write() {
        tracing::error!("could not write {}: {error}", temporary_path.display());
        let _ = fs::remove_file(&temporary_path);
        return Err(Error::WriteFailure(error.to_string()));
    }

    fs::rename(&temporary_path, path).map_err(|error| {
        tracing::error!(
            "could not move {} to {}: {error}",
            temporary_path.display(),
            path.display()
        );
        let _ = fs::remove_file(&temporary_path);
        Error::WriteFailure(error.to_string())
    })
}

fn temporary_path_for(path: &Path) -> PathBuf {
    let mut file_name = OsString::from(path.as_os_str());
    file_name.push(".tmp");
    PathBuf::from(file_name)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error,
        record::{Kind, Record},
        test_utils::TempFile,
    };

    use super::{CsvStore, RecordStore, read_records};

    fn coffee() -> Record {
        Record::new(
            date!(2024 - 01 - 01),
            "coffee",
            "Food",
            Kind::Expense,
            dec!(50.00),
        )
    }

    fn salary() -> Record {
        Record::new(
            date!(2024 - 01 - 01),
            "salary",
            "Salary",
            Kind::Income,
            dec!(1000.00),
        )
    }

    #[test]
    fn load_missing_file_returns_empty_collection() {
        let file = TempFile::new("missing");
        let store = CsvStore::new(file.path());

        let records = store.load().unwrap();

        assert!(records.is_empty());
    }

    #[test]
    fn load_empty_file_returns_empty_collection() {
        let file = TempFile::new("empty");
        fs::write(file.path(), "").unwrap();
        let store = CsvStore::new(file.path());

        let records = store.load().unwrap();

        assert!(records.is_empty());
    }

    #[test]
    fn load_header_only_returns_empty_collection() {
        let records = read_records("Date,Item,Category,Type,Amount\n".as_bytes()).unwrap();

        assert!(records.is_empty());
    }

    #[test]
    fn append_then_load_returns_appended_record_last() {
        let file = TempFile::new("round-trip");
        let mut store = CsvStore::new(file.path());

        store.append(coffee()).unwrap();
        let returned = store.append(salary()).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, vec![coffee(), salary()]);
        assert_eq!(returned, loaded);
        assert_eq!(loaded.last(), Some(&salary()));
    }

    #[test]
    fn append_writes_expected_file_format() {
        let file = TempFile::new("format");
        let mut store = CsvStore::new(file.path());

        store.append(coffee()).unwrap();
        store
            .append(Record::new(
                date!(2024 - 01 - 02),
                "",
                "Salary",
                Kind::Income,
                dec!(1000),
            ))
            .unwrap();

        let text = fs::read_to_string(file.path()).unwrap();
        assert_eq!(
            text,
            "Date,Item,Category,Type,Amount\n\
            2024-01-01,coffee,Food,Expense,50.00\n\
            2024-01-02,,Salary,Income,1000\n"
        );
    }

    #[test]
    fn append_keeps_duplicates_in_insertion_order() {
        let file = TempFile::new("duplicates");
        let mut store = CsvStore::new(file.path());

        store.append(coffee()).unwrap();
        store.append(coffee()).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, vec![coffee(), coffee()]);
    }

    #[test]
    fn item_with_comma_survives_round_trip() {
        let file = TempFile::new("quoted");
        let mut store = CsvStore::new(file.path());
        let record = Record::new(
            date!(2024 - 03 - 05),
            "bread, milk \"fresh\"",
            "Food",
            Kind::Expense,
            dec!(3.20),
        );

        store.append(record.clone()).unwrap();

        assert_eq!(store.load().unwrap(), vec![record]);
    }

    #[test]
    fn append_leaves_no_temporary_file() {
        let file = TempFile::new("no-temporary");
        let mut store = CsvStore::new(file.path());

        store.append(coffee()).unwrap();

        assert!(!super::temporary_path_for(file.path()).exists());
    }

    #[test]
    fn reads_legacy_type_labels_and_dates() {
        let text = "Date,Item,Category,Type,Amount\n\
            2024-01-01 00:00:00,ค่ากาแฟ,อาหาร,รายจ่าย,50.0\n\
            2024/01/02,เงินเดือน,เงินเดือน,รายรับ,1000.0\n";

        let records = read_records(text.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, Kind::Expense);
        assert_eq!(records[0].date, date!(2024 - 01 - 01));
        assert_eq!(records[0].amount, dec!(50));
        assert_eq!(records[1].kind, Kind::Income);
        assert_eq!(records[1].date, date!(2024 - 01 - 02));
        assert_eq!(records[1].amount, dec!(1000));
    }

    #[test]
    fn malformed_date_fails_the_whole_load() {
        let text = "Date,Item,Category,Type,Amount\n\
            2024-01-01,coffee,Food,Expense,50\n\
            not a date,tea,Food,Expense,20\n";

        let result = read_records(text.as_bytes());

        assert_eq!(
            result,
            Err(Error::MalformedDate {
                line: 3,
                value: "not a date".to_owned()
            })
        );
    }

    #[test]
    fn malformed_amount_fails_the_whole_load() {
        let text = "Date,Item,Category,Type,Amount\n\
            2024-01-01,coffee,Food,Expense,fifty\n";

        let result = read_records(text.as_bytes());

        assert_eq!(
            result,
            Err(Error::MalformedAmount {
                line: 2,
                value: "fifty".to_owned()
            })
        );
    }

    #[test]
    fn unknown_type_label_is_corrupt() {
        let text = "Date,Item,Category,Type,Amount\n\
            2024-01-01,coffee,Food,Refund,50\n";

        let result = read_records(text.as_bytes());

        assert!(
            matches!(result, Err(Error::CorruptStore { line: 2, .. })),
            "want corrupt store error on line 2, got {result:?}"
        );
    }

    #[test]
    fn missing_column_is_corrupt() {
        let text = "Date,Item,Category,Type,Amount\n\
            2024-01-01,coffee,Food,Expense\n";

        let result = read_records(text.as_bytes());

        assert!(
            matches!(result, Err(Error::CorruptStore { .. })),
            "want corrupt store error, got {result:?}"
        );
    }

    #[test]
    fn append_does_not_overwrite_unreadable_store() {
        let file = TempFile::new("unreadable");
        let original = "Date,Item,Category,Type,Amount\nbad,coffee,Food,Expense,50\n";
        fs::write(file.path(), original).unwrap();
        let mut store = CsvStore::new(file.path());

        let result = store.append(coffee());

        assert!(matches!(result, Err(Error::MalformedDate { line: 2, .. })));
        assert_eq!(fs::read_to_string(file.path()).unwrap(), original);
    }

    #[test]
    fn append_to_missing_directory_is_write_failure() {
        let file = TempFile::new("no-such-directory");
        let mut store = CsvStore::new(file.path().join("nested").join("data.csv"));

        let result = store.append(coffee());

        assert!(
            matches!(result, Err(Error::WriteFailure(_))),
            "want write failure, got {result:?}"
        );
    }
}
