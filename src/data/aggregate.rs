use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use super::model::{RecordStore, VehicleRecord};

/// Bucket label for records whose categorical field is empty.
pub const UNKNOWN_BUCKET: &str = "Unknown";

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Headline numbers for the summary tiles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_count: usize,
    /// Distinct make strings in the view; an empty make collapses to one
    /// bucket like any other value.
    pub distinct_make_count: usize,
    /// Mean electric range over the whole view (absent ranges contribute
    /// nothing to the sum but the denominator is the full view length).
    /// `NaN` when the view is empty; consumers must check before display.
    pub average_range: f64,
}

/// Reduce the view to its summary statistics.
pub fn summarize(store: &RecordStore, view: &[usize]) -> SummaryStats {
    let mut makes: BTreeSet<&str> = BTreeSet::new();
    let mut range_sum: u64 = 0;

    for &i in view {
        let rec = &store.records[i];
        makes.insert(rec.make.as_str());
        if let Some(range) = rec.electric_range {
            range_sum += u64::from(range);
        }
    }
    SummaryStats {
        total_count: view.len(),
        distinct_make_count: makes.len(),
        // 0.0 / 0.0 on an empty view: deliberately NaN, never zero.
        average_range: range_sum as f64 / view.len() as f64,
    }
}

// ---------------------------------------------------------------------------
// Category distributions
// ---------------------------------------------------------------------------

/// Count records per category as chosen by `field`.
///
/// Records where `field` yields an empty string land in the
/// [`UNKNOWN_BUCKET`]; none are dropped, so the counts always sum to the
/// view length. The returned map is keyed alphabetically but consumers
/// must treat it as unordered.
pub fn distribution_by<F>(store: &RecordStore, view: &[usize], field: F) -> BTreeMap<String, usize>
where
    F: Fn(&VehicleRecord) -> &str,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for &i in view {
        let raw = field(&store.records[i]);
        let key = if raw.is_empty() { UNKNOWN_BUCKET } else { raw };
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    counts
}

/// The `n` largest buckets of the same grouping, descending by count.
///
/// Tie-break: equal counts keep first-seen order (the bucket whose
/// category appears earlier in the view wins), so identical input always
/// yields identical output. The grouping pass records buckets in order of
/// first appearance and the descending sort is stable.
pub fn top_n<F>(store: &RecordStore, view: &[usize], field: F, n: usize) -> Vec<(String, usize)>
where
    F: Fn(&VehicleRecord) -> &str,
{
    let mut buckets: Vec<(String, usize)> = Vec::new();
    let mut slot: HashMap<String, usize> = HashMap::new();

    for &i in view {
        let raw = field(&store.records[i]);
        let key = if raw.is_empty() { UNKNOWN_BUCKET } else { raw };
        match slot.get(key) {
            Some(&pos) => buckets[pos].1 += 1,
            None => {
                slot.insert(key.to_string(), buckets.len());
                buckets.push((key.to_string(), 1));
            }
        }
    }
    buckets.sort_by(|a, b| b.1.cmp(&a.1));
    buckets.truncate(n);
    buckets
}

// ---------------------------------------------------------------------------
// Per-year averages
// ---------------------------------------------------------------------------

/// Mean electric range per model year, ascending by year.
///
/// Only records with both a present model year and a present electric
/// range qualify; the rest are skipped outright (there is no x-axis
/// position for an unknown year). A year with no qualifying records
/// simply does not appear.
pub fn average_by_year(store: &RecordStore, view: &[usize]) -> Vec<(u16, f64)> {
    let mut sums: BTreeMap<u16, (u64, u32)> = BTreeMap::new();

    for &i in view {
        let rec = &store.records[i];
        let (Some(year), Some(range)) = (rec.model_year, rec.electric_range) else {
            continue;
        };
        let entry = sums.entry(year).or_insert((0, 0));
        entry.0 += u64::from(range);
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(year, (sum, count))| (year, sum as f64 / f64::from(count)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::sample_record;

    fn full_view(store: &RecordStore) -> Vec<usize> {
        (0..store.len()).collect()
    }

    #[test]
    fn summary_counts_and_mean_over_the_whole_view() {
        let store = RecordStore::from_records(vec![
            sample_record("Tesla", Some(2021), Some(100)),
            sample_record("Tesla", Some(2020), Some(200)),
            sample_record("Ford", Some(2021), None),
        ]);
        let stats = summarize(&store, &full_view(&store));

        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.distinct_make_count, 2);
        // Absent range still counts in the denominator: 300 / 3.
        assert_eq!(stats.average_range, 100.0);
    }

    #[test]
    fn summary_keeps_present_zero_range_in_the_sum() {
        let store = RecordStore::from_records(vec![
            sample_record("Nissan", Some(2022), Some(0)),
            sample_record("Nissan", Some(2022), Some(150)),
        ]);
        let stats = summarize(&store, &full_view(&store));
        assert_eq!(stats.average_range, 75.0);
    }

    #[test]
    fn summary_of_empty_view_is_nan_not_zero() {
        let store = RecordStore::default();
        let stats = summarize(&store, &[]);

        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.distinct_make_count, 0);
        assert!(stats.average_range.is_nan());
    }

    #[test]
    fn empty_make_collapses_to_a_single_bucket() {
        let store = RecordStore::from_records(vec![
            sample_record("", Some(2021), None),
            sample_record("", Some(2022), None),
            sample_record("Tesla", Some(2021), None),
        ]);
        let stats = summarize(&store, &full_view(&store));
        assert_eq!(stats.distinct_make_count, 2);
    }

    #[test]
    fn distribution_buckets_sum_to_the_view_length() {
        let mut records = vec![
            sample_record("Tesla", Some(2021), Some(215)),
            sample_record("Ford", Some(2021), Some(20)),
            sample_record("Ford", Some(2020), Some(21)),
        ];
        records[1].vehicle_type = "Plug-in Hybrid Electric Vehicle (PHEV)".to_string();
        records[2].vehicle_type = String::new();
        let store = RecordStore::from_records(records);

        let dist = distribution_by(&store, &full_view(&store), |r| r.vehicle_type.as_str());

        assert_eq!(dist.values().sum::<usize>(), 3);
        assert_eq!(dist.get(UNKNOWN_BUCKET), Some(&1));
        assert_eq!(dist.len(), 3);
    }

    #[test]
    fn top_n_is_descending_and_truncated() {
        let store = RecordStore::from_records(vec![
            sample_record("Tesla", Some(2021), None),
            sample_record("Tesla", Some(2021), None),
            sample_record("Tesla", Some(2021), None),
            sample_record("Ford", Some(2021), None),
            sample_record("Ford", Some(2021), None),
            sample_record("Nissan", Some(2021), None),
        ]);
        let top = top_n(&store, &full_view(&store), |r| r.make.as_str(), 2);

        assert_eq!(
            top,
            vec![("Tesla".to_string(), 3), ("Ford".to_string(), 2)]
        );
    }

    #[test]
    fn top_n_ties_keep_first_seen_order() {
        let store = RecordStore::from_records(vec![
            sample_record("Kia", Some(2021), None),
            sample_record("BMW", Some(2021), None),
            sample_record("Audi", Some(2021), None),
        ]);
        let top = top_n(&store, &full_view(&store), |r| r.make.as_str(), 3);

        // All counts equal: order of first appearance, not alphabetical.
        assert_eq!(
            top,
            vec![
                ("Kia".to_string(), 1),
                ("BMW".to_string(), 1),
                ("Audi".to_string(), 1),
            ]
        );
    }

    #[test]
    fn top_n_length_is_min_of_n_and_bucket_count() {
        let store = RecordStore::from_records(vec![
            sample_record("Tesla", Some(2021), None),
            sample_record("Ford", Some(2021), None),
        ]);
        let top = top_n(&store, &full_view(&store), |r| r.make.as_str(), 5);
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn yearly_average_is_ascending_and_skips_incomplete_records() {
        let store = RecordStore::from_records(vec![
            sample_record("Tesla", Some(2022), Some(300)),
            sample_record("Tesla", Some(2020), Some(100)),
            sample_record("Tesla", Some(2020), Some(200)),
            sample_record("Ford", None, Some(150)),
            sample_record("Ford", Some(2021), None),
        ]);
        let averages = average_by_year(&store, &full_view(&store));

        // 2021 had no qualifying record, so it does not appear at all.
        assert_eq!(averages, vec![(2020, 150.0), (2022, 300.0)]);
        assert!(averages.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn yearly_average_of_empty_view_is_empty() {
        let store = RecordStore::default();
        assert!(average_by_year(&store, &[]).is_empty());
    }
}
