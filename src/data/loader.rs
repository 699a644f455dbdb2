use std::io;
use std::path::Path;
use std::str::FromStr;

use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{RecordStore, VehicleRecord};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a load failed outright. Individual field anomalies never surface
/// here: a row with a blank or garbled numeric cell is kept with the field
/// absent, and only counted (see [`parse_num`]).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("expected a top-level JSON array of records")]
    NotAnArray,
    #[error("row {row} is not a JSON object")]
    NotAnObject { row: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the vehicle dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – the registry export with its 17 named columns (recommended)
/// * `.json` – records-oriented array of objects keyed by the same column
///   names
pub fn load_file(path: &Path) -> Result<RecordStore, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let store = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };
    log::info!(
        "Loaded {} vehicle records from {}",
        store.len(),
        path.display()
    );
    Ok(store)
}

// ---------------------------------------------------------------------------
// Shared cell coercion
// ---------------------------------------------------------------------------

/// Parse an optional numeric cell. An empty cell means "absent"; anything
/// unparseable is treated the same way but counted so the load can report
/// it. A literal `0` parses and stays present.
fn parse_num<T: FromStr>(raw: &str, anomalies: &mut usize) -> Option<T> {
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            *anomalies += 1;
            None
        }
    }
}

fn warn_anomalies(anomalies: usize) {
    if anomalies > 0 {
        log::warn!("{anomalies} numeric cells could not be parsed and were left absent");
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Column positions resolved from the header row. The export's column
/// order varies between vintages, so every column is located by name.
struct Columns {
    vin: usize,
    county: usize,
    city: usize,
    state: usize,
    postal_code: usize,
    model_year: usize,
    make: usize,
    model: usize,
    vehicle_type: usize,
    cafv: usize,
    electric_range: usize,
    base_msrp: usize,
    legislative_district: usize,
    dol_id: usize,
    location: usize,
    utility: usize,
    census_tract: usize,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(LoadError::MissingColumn(name))
        };
        Ok(Columns {
            vin: find("VIN (1-10)")?,
            county: find("County")?,
            city: find("City")?,
            state: find("State")?,
            postal_code: find("Postal Code")?,
            model_year: find("Model Year")?,
            make: find("Make")?,
            model: find("Model")?,
            vehicle_type: find("Electric Vehicle Type")?,
            cafv: find("Clean Alternative Fuel Vehicle (CAFV) Eligibility")?,
            electric_range: find("Electric Range")?,
            base_msrp: find("Base MSRP")?,
            legislative_district: find("Legislative District")?,
            dol_id: find("DOL Vehicle ID")?,
            location: find("Vehicle Location")?,
            utility: find("Electric Utility")?,
            census_tract: find("2020 Census Tract")?,
        })
    }
}

fn load_csv(path: &Path) -> Result<RecordStore, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let cols = Columns::locate(reader.headers()?)?;

    let mut records = Vec::new();
    let mut anomalies: usize = 0;

    for result in reader.records() {
        let row = result?;
        let cell = |idx: usize| row.get(idx).unwrap_or("").trim();

        records.push(VehicleRecord {
            vin_prefix: cell(cols.vin).to_string(),
            county: cell(cols.county).to_string(),
            city: cell(cols.city).to_string(),
            state: cell(cols.state).to_string(),
            postal_code: parse_num(cell(cols.postal_code), &mut anomalies),
            model_year: parse_num(cell(cols.model_year), &mut anomalies),
            make: cell(cols.make).to_string(),
            model: cell(cols.model).to_string(),
            vehicle_type: cell(cols.vehicle_type).to_string(),
            cafv_eligibility: cell(cols.cafv).to_string(),
            electric_range: parse_num(cell(cols.electric_range), &mut anomalies),
            base_msrp: parse_num(cell(cols.base_msrp), &mut anomalies),
            legislative_district: parse_num(cell(cols.legislative_district), &mut anomalies),
            dol_vehicle_id: parse_num(cell(cols.dol_id), &mut anomalies).unwrap_or(0),
            vehicle_location: cell(cols.location).to_string(),
            electric_utility: cell(cols.utility).to_string(),
            census_tract: parse_num(cell(cols.census_tract), &mut anomalies),
        });
    }
    warn_anomalies(anomalies);
    Ok(RecordStore::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, keyed by the CSV column names):
///
/// ```json
/// [
///   {
///     "VIN (1-10)": "5YJ3E1EA",
///     "County": "King",
///     "Model Year": 2021,
///     "Electric Range": 215,
///     ...
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<RecordStore, LoadError> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;
    let rows = root.as_array().ok_or(LoadError::NotAnArray)?;

    let mut records = Vec::with_capacity(rows.len());
    let mut anomalies: usize = 0;

    for (row_no, rec) in rows.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or(LoadError::NotAnObject { row: row_no })?;

        records.push(VehicleRecord {
            vin_prefix: json_cell(obj, "VIN (1-10)"),
            county: json_cell(obj, "County"),
            city: json_cell(obj, "City"),
            state: json_cell(obj, "State"),
            postal_code: parse_num(&json_cell(obj, "Postal Code"), &mut anomalies),
            model_year: parse_num(&json_cell(obj, "Model Year"), &mut anomalies),
            make: json_cell(obj, "Make"),
            model: json_cell(obj, "Model"),
            vehicle_type: json_cell(obj, "Electric Vehicle Type"),
            cafv_eligibility: json_cell(obj, "Clean Alternative Fuel Vehicle (CAFV) Eligibility"),
            electric_range: parse_num(&json_cell(obj, "Electric Range"), &mut anomalies),
            base_msrp: parse_num(&json_cell(obj, "Base MSRP"), &mut anomalies),
            legislative_district: parse_num(
                &json_cell(obj, "Legislative District"),
                &mut anomalies,
            ),
            dol_vehicle_id: parse_num(&json_cell(obj, "DOL Vehicle ID"), &mut anomalies)
                .unwrap_or(0),
            vehicle_location: json_cell(obj, "Vehicle Location"),
            electric_utility: json_cell(obj, "Electric Utility"),
            census_tract: parse_num(&json_cell(obj, "2020 Census Tract"), &mut anomalies),
        });
    }
    warn_anomalies(anomalies);
    Ok(RecordStore::from_records(records))
}

/// Render one JSON field as cell text. Missing keys and `null` become the
/// empty cell; numbers render as bare literals so [`parse_num`] applies
/// uniformly to both formats.
fn json_cell(obj: &serde_json::Map<String, JsonValue>, name: &str) -> String {
    match obj.get(name) {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
    }
}
