use std::fs::File;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::{debug, info};

use crate::error::LoadError;
use crate::types::{Record, RecordSet};

const CITY: &str = "City";
const GENDER: &str = "Gender";
const PRODUCT_LINE: &str = "Product line";
const TOTAL: &str = "Total";
const RATING: &str = "Rating";
const DATE: &str = "Date";

// Month-first is what the sales export uses; ISO is accepted for hand-made files.
const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

/// Column positions resolved from the header row.
struct Columns {
    city: usize,
    gender: usize,
    product_line: usize,
    total: usize,
    rating: usize,
    date: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(LoadError::MissingColumn(name))
        };
        Ok(Self {
            city: find(CITY)?,
            gender: find(GENDER)?,
            product_line: find(PRODUCT_LINE)?,
            total: find(TOTAL)?,
            rating: find(RATING)?,
            date: find(DATE)?,
        })
    }
}

/// Reads the whole transactions file into memory.
///
/// Any row that cannot be parsed aborts the load: the dashboard never serves a
/// partially read table.
pub fn load(path: impl AsRef<Path>) -> Result<RecordSet, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);
    let columns = Columns::locate(rdr.headers()?)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        records.push(parse_row(&row, &columns)?);
    }

    let set = RecordSet::new(records);
    let options = set.filter_options();
    info!(
        path = %path.display(),
        rows = set.len(),
        cities = options.cities.len(),
        genders = options.genders.len(),
        "sales data loaded"
    );
    Ok(set)
}

fn parse_row(row: &StringRecord, columns: &Columns) -> Result<Record, LoadError> {
    let line = row.position().map(|p| p.line()).unwrap_or_default();
    let field = |idx: usize| row.get(idx).unwrap_or_default();

    let total = parse_number(field(columns.total), line, TOTAL)?;
    let rating = parse_number(field(columns.rating), line, RATING)?;
    let date = parse_date(field(columns.date), line)?;

    let record = Record::new(
        field(columns.city),
        field(columns.gender),
        field(columns.product_line),
        total,
        rating,
        date,
    );
    debug!(line, date = %record.date, week = %record.week, "parsed row");
    Ok(record)
}

fn parse_number(value: &str, line: u64, column: &'static str) -> Result<f64, LoadError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LoadError::InvalidField {
            line,
            column,
            value: value.to_string(),
        })
}

fn parse_date(value: &str, line: u64) -> Result<NaiveDate, LoadError> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .ok_or_else(|| LoadError::InvalidField {
            line,
            column: DATE,
            value: value.to_string(),
        })
}
