use serde::Serialize;

use super::model::{RecordStore, VehicleRecord};

// ---------------------------------------------------------------------------
// Page – one slice of the filtered view
// ---------------------------------------------------------------------------

/// One fixed-size slice of the filtered view plus the range metadata for a
/// "showing X-Y of Z" label.
#[derive(Debug, Clone, Serialize)]
pub struct Page<'a> {
    pub items: Vec<&'a VehicleRecord>,
    /// 1-based page number as requested by the caller.
    pub page_number: usize,
    /// 1-based index of the first row on this page; 0 when the page is
    /// empty.
    pub start_index: usize,
    /// 1-based index of the last row on this page; 0 when the page is
    /// empty.
    pub end_index: usize,
    /// Length of the whole filtered view, not of this page.
    pub total_count: usize,
}

/// Number of pages needed for `total` rows. An empty view still occupies
/// one (empty) page so navigation has somewhere to stand. A zero page size
/// is treated as one row per page.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested 1-based page number into the valid range for the
/// view. Navigation must call this on every page change and again after
/// every filter change, since refiltering can leave the current page past
/// the new last page.
pub fn clamp_page(page_number: usize, total: usize, page_size: usize) -> usize {
    page_number.clamp(1, page_count(total, page_size))
}

/// Cut the `page_number`-th slice out of the view.
///
/// Pure range selection: no clamping happens here. `page_number` is
/// 1-based and assumed already clamped by the caller ([`clamp_page`]); an
/// out-of-range page yields an empty item list rather than a panic.
pub fn paginate<'a>(
    store: &'a RecordStore,
    view: &[usize],
    page_number: usize,
    page_size: usize,
) -> Page<'a> {
    let page_size = page_size.max(1);
    let offset = page_number.saturating_sub(1) * page_size;

    let items: Vec<&VehicleRecord> = view
        .iter()
        .skip(offset)
        .take(page_size)
        .map(|&i| &store.records[i])
        .collect();

    let (start_index, end_index) = if items.is_empty() {
        (0, 0)
    } else {
        (offset + 1, offset + items.len())
    };
    Page {
        items,
        page_number,
        start_index,
        end_index,
        total_count: view.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::sample_record;

    fn store_of(n: usize) -> RecordStore {
        let records = (0..n)
            .map(|i| sample_record("Tesla", Some(2021), Some(i as u32)))
            .collect();
        RecordStore::from_records(records)
    }

    #[test]
    fn first_page_of_twenty_three_rows() {
        let store = store_of(23);
        let view: Vec<usize> = (0..23).collect();
        let page = paginate(&store, &view, 1, 10);

        assert_eq!(page.items.len(), 10);
        assert_eq!(page.start_index, 1);
        assert_eq!(page.end_index, 10);
        assert_eq!(page.total_count, 23);
    }

    #[test]
    fn last_page_of_twenty_three_rows_is_short() {
        let store = store_of(23);
        let view: Vec<usize> = (0..23).collect();
        let page = paginate(&store, &view, 3, 10);

        assert_eq!(page.items.len(), 3);
        assert_eq!(page.start_index, 21);
        assert_eq!(page.end_index, 23);
    }

    #[test]
    fn page_four_clamps_back_to_page_three() {
        assert_eq!(page_count(23, 10), 3);
        assert_eq!(clamp_page(4, 23, 10), 3);
        assert_eq!(clamp_page(0, 23, 10), 1);
    }

    #[test]
    fn out_of_range_page_is_empty_not_a_panic() {
        let store = store_of(23);
        let view: Vec<usize> = (0..23).collect();
        let page = paginate(&store, &view, 4, 10);

        assert!(page.items.is_empty());
        assert_eq!(page.start_index, 0);
        assert_eq!(page.end_index, 0);
        assert_eq!(page.total_count, 23);
    }

    #[test]
    fn empty_view_occupies_one_empty_page() {
        let store = RecordStore::default();
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(clamp_page(7, 0, 10), 1);

        let page = paginate(&store, &[], 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.start_index, 0);
        assert_eq!(page.end_index, 0);
        assert_eq!(page.total_count, 0);
    }

    #[test]
    fn page_respects_view_order_not_store_order() {
        let store = store_of(5);
        // A view that skips records 1 and 3.
        let view = vec![0, 2, 4];
        let page = paginate(&store, &view, 1, 2);

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].electric_range, Some(0));
        assert_eq!(page.items[1].electric_range, Some(2));
    }
}
