use std::collections::BTreeSet;

use serde::Serialize;

// ---------------------------------------------------------------------------
// VehicleRecord – one row of the source dataset
// ---------------------------------------------------------------------------

/// A single registered vehicle (one row of the population export).
///
/// Numeric fields the export sometimes leaves blank are `Option`s; `None`
/// means "absent", and a present `0` stays a present `0`. The aggregation
/// rules depend on that distinction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleRecord {
    /// First ten characters of the VIN.
    pub vin_prefix: String,
    pub county: String,
    pub city: String,
    pub state: String,
    pub postal_code: Option<u32>,
    pub model_year: Option<u16>,
    pub make: String,
    pub model: String,
    /// Categorical, e.g. "Battery Electric Vehicle (BEV)".
    pub vehicle_type: String,
    /// Clean Alternative Fuel Vehicle eligibility, categorical.
    pub cafv_eligibility: String,
    /// Electric range in miles; zero means "not researched" in the source
    /// data but is still a present value.
    pub electric_range: Option<u32>,
    pub base_msrp: Option<u32>,
    pub legislative_district: Option<u8>,
    /// Department of Licensing identifier.
    pub dol_vehicle_id: u64,
    /// Raw geo-point text, e.g. "POINT (-122.33 47.61)".
    pub vehicle_location: String,
    pub electric_utility: String,
    pub census_tract: Option<u64>,
}

// ---------------------------------------------------------------------------
// RecordStore – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The fully loaded dataset plus pre-computed facet sets.
///
/// Immutable after construction: the store is built once from the parsed
/// rows and only ever read afterwards. The facet sets are computed over the
/// *unfiltered* records so filter-control options never shrink as a side
/// effect of the user's own selection.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    /// All records, in source order.
    pub records: Vec<VehicleRecord>,
    /// Distinct model years across the whole store, ascending.
    pub years: BTreeSet<u16>,
    /// Distinct make strings across the whole store, sorted.
    pub makes: BTreeSet<String>,
}

impl RecordStore {
    /// Build the store and its facet indices from the loaded records.
    pub fn from_records(records: Vec<VehicleRecord>) -> Self {
        let mut years = BTreeSet::new();
        let mut makes = BTreeSet::new();

        for rec in &records {
            if let Some(year) = rec.model_year {
                years.insert(year);
            }
            makes.insert(rec.make.clone());
        }
        RecordStore {
            records,
            years,
            makes,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is still in its pre-load (empty) state.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------

/// A plausible record for tests; callers mutate the fields they care about.
#[cfg(test)]
pub(crate) fn sample_record(
    make: &str,
    model_year: Option<u16>,
    electric_range: Option<u32>,
) -> VehicleRecord {
    VehicleRecord {
        vin_prefix: "5YJ3E1EA".to_string(),
        county: "King".to_string(),
        city: "Seattle".to_string(),
        state: "WA".to_string(),
        postal_code: Some(98101),
        model_year,
        make: make.to_string(),
        model: "Model 3".to_string(),
        vehicle_type: "Battery Electric Vehicle (BEV)".to_string(),
        cafv_eligibility: "Clean Alternative Fuel Vehicle Eligible".to_string(),
        electric_range,
        base_msrp: None,
        legislative_district: Some(43),
        dol_vehicle_id: 123456789,
        vehicle_location: "POINT (-122.33 47.61)".to_string(),
        electric_utility: "CITY OF SEATTLE".to_string(),
        census_tract: Some(53033007300),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facets_cover_the_whole_store() {
        let store = RecordStore::from_records(vec![
            sample_record("Tesla", Some(2021), Some(215)),
            sample_record("Ford", Some(2019), Some(120)),
            sample_record("Tesla", Some(2023), None),
            sample_record("Nissan", None, Some(84)),
        ]);

        assert_eq!(store.len(), 4);
        assert_eq!(
            store.years.iter().copied().collect::<Vec<_>>(),
            vec![2019, 2021, 2023]
        );
        assert_eq!(store.makes.len(), 3);
        assert!(store.makes.contains("Ford"));
    }

    #[test]
    fn absent_year_contributes_no_facet_entry() {
        let store = RecordStore::from_records(vec![sample_record("Kia", None, Some(230))]);
        assert!(store.years.is_empty());
    }

    #[test]
    fn default_store_is_the_empty_lifecycle_state() {
        let store = RecordStore::default();
        assert!(store.is_empty());
        assert!(store.years.is_empty());
        assert!(store.makes.is_empty());
    }
}
