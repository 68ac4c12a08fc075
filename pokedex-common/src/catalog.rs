//! List filtering, enumeration and simple lookup over the entity table

use std::collections::BTreeSet;

use crate::models::Entity;
use crate::numeric::parse_leading_int;
use crate::store::DataStore;

/// Composable list filters; every `None` field imposes no constraint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Case-sensitive substring of `name_zh`
    pub name_zh: Option<String>,
    /// Case-insensitive substring of `name_ja`
    pub name_ja: Option<String>,
    /// Case-insensitive substring of `name_en`
    pub name_en: Option<String>,
    /// Exact match on `type1` or `type2`
    pub type_name: Option<String>,
    /// Raw generation value, read up to its first non-digit; one with no
    /// leading integer matches nothing
    pub generation: Option<String>,
}

impl ListFilter {
    /// Drop empty values so they behave like absent parameters
    pub fn normalized(self) -> Self {
        let keep = |v: Option<String>| v.filter(|s| !s.is_empty());
        Self {
            name_zh: keep(self.name_zh),
            name_ja: keep(self.name_ja),
            name_en: keep(self.name_en),
            type_name: keep(self.type_name),
            generation: keep(self.generation),
        }
    }

    /// True if `entity` passes every supplied filter
    pub fn matches(&self, entity: &Entity) -> bool {
        if let Some(name) = &self.name_zh {
            if !entity.name_zh.contains(name.as_str()) {
                return false;
            }
        }
        if let Some(name) = &self.name_ja {
            if !contains_ignore_case(&entity.name_ja, name) {
                return false;
            }
        }
        if let Some(name) = &self.name_en {
            if !contains_ignore_case(&entity.name_en, name) {
                return false;
            }
        }
        if let Some(type_name) = &self.type_name {
            if !entity.has_type(type_name) {
                return false;
            }
        }
        if let Some(raw) = &self.generation {
            if parse_leading_int(raw) != Some(entity.generation) {
                return false;
            }
        }
        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Entities passing `filter`, in table order
pub fn filter_entities<'a>(store: &'a DataStore, filter: &ListFilter) -> Vec<&'a Entity> {
    store
        .entities()
        .iter()
        .filter(|e| filter.matches(e))
        .collect()
}

/// Distinct non-empty type names across both slots, sorted ascending
pub fn distinct_types(store: &DataStore) -> Vec<String> {
    store
        .entities()
        .iter()
        .flat_map(|e| [Some(e.type1.as_str()), e.secondary_type()])
        .flatten()
        .filter(|t| !t.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Distinct generations, sorted ascending
pub fn distinct_generations(store: &DataStore) -> Vec<i64> {
    store
        .entities()
        .iter()
        .map(|e| e.generation)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Exact `id` match, else the first record of group `id`
///
/// Unlike the resolver this never falls back to names.
pub fn find_by_id_or_idx(store: &DataStore, id: i64) -> Option<&Entity> {
    store.find_by_id(id).or_else(|| store.first_in_group(id))
}
