use std::ops::Range;

/// Bijection between a time-sorted view of an array and its original order.
///
/// Sorting, chunking and un-sorting all thread through this one value, so reference indices
/// discovered in sorted space can always be translated back to the caller's numbering.
#[derive(Debug, Clone)]
pub struct IndexMap {
    sorted_to_original: Vec<usize>,
}

impl IndexMap {
    /// Argsort `times` ascending. `f64::total_cmp` gives NaN a defined place (after all
    /// finite values) so degenerate inputs cannot panic the sort.
    pub fn from_times(times: &[f64]) -> Self {
        let mut sorted_to_original: Vec<usize> = (0..times.len()).collect();
        sorted_to_original.sort_by(|&a, &b| times[a].total_cmp(&times[b]));
        Self { sorted_to_original }
    }

    pub fn len(&self) -> usize {
        self.sorted_to_original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_to_original.is_empty()
    }

    /// Original index of the element at `sorted` position.
    #[inline]
    pub fn original(&self, sorted: usize) -> usize {
        self.sorted_to_original[sorted]
    }

    /// Original indices of a contiguous sorted-order range.
    pub fn originals(&self, range: Range<usize>) -> &[usize] {
        &self.sorted_to_original[range]
    }

    /// Copy of `data` rearranged into sorted order.
    pub fn permuted<T: Clone>(&self, data: &[T]) -> Vec<T> {
        self.sorted_to_original
            .iter()
            .map(|&i| data[i].clone())
            .collect()
    }
}
