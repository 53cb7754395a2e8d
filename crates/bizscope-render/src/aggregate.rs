//! Category frequency counts over a set of business records.

use std::collections::HashMap;

use bizscope_core::{BusinessRecord, CategoryCount};

/// Explodes every record's categories into single tokens and counts them.
///
/// A record with N categories contributes N tokens. The result is sorted by
/// descending count; equal counts keep the order in which each category was
/// first seen, so a fixed input order always yields the same output.
#[must_use]
pub fn aggregate_categories(records: &[BusinessRecord]) -> Vec<CategoryCount> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CategoryCount> = Vec::new();

    for category in records.iter().flat_map(|r| r.categories.iter()) {
        let slot = *slots.entry(category.as_str()).or_insert_with(|| {
            counts.push(CategoryCount {
                category: category.clone(),
                count: 0,
            });
            counts.len() - 1
        });
        counts[slot].count += 1;
    }

    // Stable sort keeps first-seen order among ties.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
