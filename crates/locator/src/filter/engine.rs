use crate::bins::Bin;

use super::types::{FilterOption, FilterSelection};

/// Bins visible under `selection`, in their original order.
///
/// With `all` every bin is returned. Otherwise a bin is kept when it accepts
/// at least one selected category; a bin matching several categories still
/// appears once.
pub fn visible_bins<'a>(bins: &'a [Bin], selection: &FilterSelection) -> Vec<&'a Bin> {
    bins.iter().filter(|bin| selection.matches(bin)).collect()
}

/// Apply one tap on the filter panel.
///
/// - `All` resets to `{all}`.
/// - An unselected category replaces `all` (if present) and is added.
/// - A selected category is removed; an emptied selection becomes `{all}`.
pub fn toggle_category(selection: &FilterSelection, option: FilterOption) -> FilterSelection {
    let category = match option {
        FilterOption::All => return FilterSelection::all(),
        FilterOption::Category(c) => c,
    };

    let mut next = selection.clone();
    if next.contains(FilterOption::Category(category)) {
        next.remove(category);
    } else {
        next.insert(category);
    }
    next
}
