use super::model::{RecordStore, VehicleRecord};

// ---------------------------------------------------------------------------
// Filter predicate: the two optional equality constraints
// ---------------------------------------------------------------------------

/// The filter-control selection: an optional model year and an optional
/// make, combined as a conjunction.
///
/// `None` means "no constraint on this dimension", never "match records
/// with no value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub year: Option<u16>,
    pub make: Option<String>,
}

impl FilterSelection {
    /// Whether a record satisfies every set constraint.
    ///
    /// Year matching is integer equality, make matching is case-sensitive
    /// string equality. A record with no model year never matches a set
    /// year constraint.
    pub fn matches(&self, rec: &VehicleRecord) -> bool {
        if let Some(year) = self.year {
            if rec.model_year != Some(year) {
                return false;
            }
        }
        if let Some(make) = &self.make {
            if rec.make != *make {
                return false;
            }
        }
        true
    }
}

/// Return indices of records that pass the current selection, in store
/// order.
///
/// Pure: never mutates the store, recomputed from scratch on every call.
pub fn filtered_indices(store: &RecordStore, selection: &FilterSelection) -> Vec<usize> {
    store
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::sample_record;

    fn store() -> RecordStore {
        RecordStore::from_records(vec![
            sample_record("Tesla", Some(2021), Some(215)),
            sample_record("Ford", Some(2021), Some(120)),
            sample_record("Tesla", Some(2019), Some(220)),
            sample_record("Nissan", None, Some(84)),
        ])
    }

    #[test]
    fn no_constraints_keeps_everything_in_store_order() {
        let view = filtered_indices(&store(), &FilterSelection::default());
        assert_eq!(view, vec![0, 1, 2, 3]);
    }

    #[test]
    fn year_constraint_is_integer_equality() {
        let selection = FilterSelection {
            year: Some(2021),
            make: None,
        };
        assert_eq!(filtered_indices(&store(), &selection), vec![0, 1]);
    }

    #[test]
    fn make_constraint_is_case_sensitive() {
        let store = store();
        let selection = FilterSelection {
            year: None,
            make: Some("tesla".to_string()),
        };
        assert!(filtered_indices(&store, &selection).is_empty());

        let selection = FilterSelection {
            year: None,
            make: Some("Tesla".to_string()),
        };
        assert_eq!(filtered_indices(&store, &selection), vec![0, 2]);
    }

    #[test]
    fn conjunction_only_shrinks_the_view() {
        let store = store();
        let year_only = FilterSelection {
            year: Some(2021),
            make: None,
        };
        let both = FilterSelection {
            year: Some(2021),
            make: Some("Tesla".to_string()),
        };

        let year_view = filtered_indices(&store, &year_only);
        let both_view = filtered_indices(&store, &both);

        assert!(year_view.len() <= store.len());
        assert!(both_view.len() <= year_view.len());
        assert_eq!(both_view, vec![0]);
    }

    #[test]
    fn absent_year_never_matches_a_set_constraint() {
        let selection = FilterSelection {
            year: Some(2024),
            make: None,
        };
        // Record 3 has no model year; a concrete constraint excludes it.
        assert!(filtered_indices(&store(), &selection).is_empty());
    }

    #[test]
    fn filtering_leaves_the_facet_index_alone() {
        let store = store();
        let selection = FilterSelection {
            year: None,
            make: Some("Tesla".to_string()),
        };
        let _view = filtered_indices(&store, &selection);

        // Facets are computed over the unfiltered store.
        assert!(store.makes.contains("Ford"));
        assert!(store.years.contains(&2019));
    }
}
