use std::collections::BTreeSet;
use std::str::FromStr;

use bevy::prelude::*;

use crate::bins::{Bin, UnknownCategoryError, WasteCategory};
use crate::styling::{self, Swatch};

/// One entry of the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterOption {
    /// "All Bins": no restriction.
    All,
    Category(WasteCategory),
}

impl FilterOption {
    /// Panel entries in display order.
    pub fn all_options() -> Vec<FilterOption> {
        std::iter::once(FilterOption::All)
            .chain(WasteCategory::all().iter().copied().map(FilterOption::Category))
            .collect()
    }

    pub fn tag(self) -> &'static str {
        match self {
            FilterOption::All => "all",
            FilterOption::Category(c) => c.tag(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterOption::All => "All Bins",
            FilterOption::Category(c) => styling::category_name(c),
        }
    }

    pub fn color(self) -> Swatch {
        match self {
            FilterOption::All => styling::GRAY_500,
            FilterOption::Category(c) => styling::category_color(c),
        }
    }
}

impl From<WasteCategory> for FilterOption {
    fn from(category: WasteCategory) -> Self {
        FilterOption::Category(category)
    }
}

impl FromStr for FilterOption {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(FilterOption::All)
        } else {
            s.parse::<WasteCategory>().map(FilterOption::Category)
        }
    }
}

/// Active category filter.
///
/// Never empty: it is either `all` or at least one category, and the two
/// never coexist.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    /// `None` is the `all` sentinel; `Some` is always non-empty.
    only: Option<BTreeSet<WasteCategory>>,
}

impl FilterSelection {
    pub fn all() -> Self {
        Self { only: None }
    }

    /// Restrict to `categories`. An empty iterator collapses to `all`.
    pub fn only(categories: impl IntoIterator<Item = WasteCategory>) -> Self {
        let set: BTreeSet<WasteCategory> = categories.into_iter().collect();
        if set.is_empty() {
            Self::all()
        } else {
            Self { only: Some(set) }
        }
    }

    pub fn is_all(&self) -> bool {
        self.only.is_none()
    }

    /// Selected categories, or `None` for `all`.
    pub fn categories(&self) -> Option<&BTreeSet<WasteCategory>> {
        self.only.as_ref()
    }

    /// Whether the panel entry for `option` is highlighted.
    pub fn contains(&self, option: FilterOption) -> bool {
        match (option, &self.only) {
            (FilterOption::All, None) => true,
            (FilterOption::All, Some(_)) => false,
            (FilterOption::Category(_), None) => false,
            (FilterOption::Category(c), Some(set)) => set.contains(&c),
        }
    }

    /// Active panel entries (`[All]` or the selected categories).
    pub fn options(&self) -> Vec<FilterOption> {
        match &self.only {
            None => vec![FilterOption::All],
            Some(set) => set.iter().copied().map(FilterOption::Category).collect(),
        }
    }

    /// Whether `bin` passes this filter.
    pub fn matches(&self, bin: &Bin) -> bool {
        match &self.only {
            None => true,
            Some(set) => bin.categories.iter().any(|c| set.contains(c)),
        }
    }

    /// "Show All Bins" quick action.
    pub fn clear(&mut self) {
        self.only = None;
    }

    /// Filter panel summary line.
    pub fn summary(&self) -> String {
        match &self.only {
            None => "Showing all bin types".to_string(),
            Some(set) if set.len() == 1 => "Showing 1 waste type".to_string(),
            Some(set) => format!("Showing {} waste types", set.len()),
        }
    }

    pub(crate) fn insert(&mut self, category: WasteCategory) {
        self.only.get_or_insert_with(BTreeSet::new).insert(category);
    }

    /// Remove `category`; collapses to `all` when nothing is left.
    pub(crate) fn remove(&mut self, category: WasteCategory) {
        if let Some(set) = &mut self.only {
            set.remove(&category);
            if set.is_empty() {
                self.only = None;
            }
        }
    }
}
