//! Resolution of an id, group id or name to one canonical entity
//!
//! Numeric keys resolve by table position. Names go through a staged fallback:
//! exact match, then bidirectional substring match, then form disambiguation
//! (base form first, else first in table order). The chosen entity is joined
//! with its detail record and the full list of forms in its group.

use serde::Serialize;

use crate::models::{DetailAttributes, Entity, FormSummary};
use crate::numeric::parse_leading_int;
use crate::store::DataStore;
use crate::{Error, Result};

/// A single lookup request, already reduced to the one honored key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Database id, falling back to group id
    Id(i64),
    /// Group id; yields the first form in table order
    Idx(i64),
    /// Chinese name, case-sensitive
    NameZh(String),
    /// English name, case-insensitive
    NameEn(String),
    /// Japanese name, case-insensitive
    NameJa(String),
}

impl Lookup {
    /// Select the lookup from raw request parameters
    ///
    /// Precedence is `id` > `idx` > `nameZh` > `nameEn` > `nameJa`. Empty
    /// values count as absent. Numeric keys are read up to the first non-digit,
    /// so `1.0` and `1abc` both mean 1. Returns `Ok(None)` when no key was
    /// supplied and [`Error::InvalidInput`] when the honored numeric key has no
    /// leading integer.
    pub fn from_params(
        id: Option<&str>,
        idx: Option<&str>,
        name_zh: Option<&str>,
        name_en: Option<&str>,
        name_ja: Option<&str>,
    ) -> Result<Option<Self>> {
        fn present(v: Option<&str>) -> Option<&str> {
            v.filter(|s| !s.is_empty())
        }

        if let Some(raw) = present(id) {
            return parse_key("id", raw).map(|v| Some(Lookup::Id(v)));
        }
        if let Some(raw) = present(idx) {
            return parse_key("idx", raw).map(|v| Some(Lookup::Idx(v)));
        }
        if let Some(name) = present(name_zh) {
            return Ok(Some(Lookup::NameZh(name.to_string())));
        }
        if let Some(name) = present(name_en) {
            return Ok(Some(Lookup::NameEn(name.to_string())));
        }
        Ok(present(name_ja).map(|name| Lookup::NameJa(name.to_string())))
    }
}

fn parse_key(name: &str, raw: &str) -> Result<i64> {
    parse_leading_int(raw)
        .ok_or_else(|| Error::InvalidInput(format!("{name} must start with an integer: {raw}")))
}

/// Canonical entity joined with its group and detail record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityProfile {
    pub id: i64,
    pub idx: i64,
    pub name_zh: String,
    pub name_ja: String,
    pub name_en: String,
    pub type1: String,
    pub type2: Option<String>,
    pub form: Option<String>,
    pub generation: i64,

    pub has_multiple_forms: bool,
    pub all_forms: Vec<FormSummary>,

    /// Detail attributes, spread into the top level only when a record exists
    #[serde(flatten)]
    pub detail: Option<DetailAttributes>,
}

/// Resolve `lookup` against `store`; `None` when nothing matches
pub fn resolve(store: &DataStore, lookup: &Lookup) -> Option<EntityProfile> {
    let entity = find_canonical(store, lookup)?;
    Some(build_profile(store, entity))
}

/// Pick the canonical entity without joining
pub fn find_canonical<'a>(store: &'a DataStore, lookup: &Lookup) -> Option<&'a Entity> {
    match lookup {
        Lookup::Id(id) => store
            .find_by_id(*id)
            .or_else(|| store.first_in_group(*id)),
        Lookup::Idx(idx) => store.first_in_group(*idx),
        Lookup::NameZh(name) => resolve_name(store.entities(), name, |e| &e.name_zh, false),
        Lookup::NameEn(name) => resolve_name(store.entities(), name, |e| &e.name_en, true),
        Lookup::NameJa(name) => resolve_name(store.entities(), name, |e| &e.name_ja, true),
    }
}

fn resolve_name<'a, F>(
    entities: &'a [Entity],
    query: &str,
    field: F,
    ignore_case: bool,
) -> Option<&'a Entity>
where
    F: Fn(&Entity) -> &String,
{
    let fold = |s: &str| {
        if ignore_case {
            s.to_lowercase()
        } else {
            s.to_string()
        }
    };
    let query = fold(query);

    if let Some(exact) = entities.iter().find(|e| fold(field(e).as_str()) == query) {
        return Some(exact);
    }

    let candidates: Vec<&Entity> = entities
        .iter()
        .filter(|e| {
            let name = fold(field(e).as_str());
            name.contains(&query) || query.contains(&name)
        })
        .collect();

    match candidates.as_slice() {
        [] => None,
        [only] => Some(*only),
        several => several
            .iter()
            .find(|e| e.is_base_form())
            .or_else(|| several.first())
            .copied(),
    }
}

fn build_profile(store: &DataStore, entity: &Entity) -> EntityProfile {
    let all_forms: Vec<FormSummary> = store.group(entity.idx).map(FormSummary::from).collect();
    let detail = store.detail_for(entity).map(|d| d.attributes.clone());

    EntityProfile {
        id: entity.id,
        idx: entity.idx,
        name_zh: entity.name_zh.clone(),
        name_ja: entity.name_ja.clone(),
        name_en: entity.name_en.clone(),
        type1: entity.type1.clone(),
        type2: entity.type2.clone(),
        form: entity.form.clone(),
        generation: entity.generation,
        has_multiple_forms: all_forms.len() > 1,
        all_forms,
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Detail;
    use serde_json::json;

    fn entity(id: i64, idx: i64, zh: &str, ja: &str, en: &str, form: &str) -> Entity {
        Entity {
            id,
            idx,
            name_zh: zh.to_string(),
            name_ja: ja.to_string(),
            name_en: en.to_string(),
            type1: "Grass".to_string(),
            type2: Some("Poison".to_string()),
            form: (!form.is_empty()).then(|| form.to_string()),
            generation: 1,
        }
    }

    fn sample_store() -> DataStore {
        DataStore::new(
            vec![
                entity(1, 1, "妙蛙种子", "フシギダネ", "Bulba", ""),
                entity(2, 1, "妙蛙种子-超级", "フシギダネ-メガ", "Bulba-Mega", "mega"),
                entity(3, 4, "小火龙", "ヒトカゲ", "Charmander", ""),
                entity(4, 25, "皮卡丘", "ピカチュウ", "Pikachu", "cap"),
                entity(5, 25, "皮卡丘", "ピカチュウ", "Pikachu-Partner", "partner"),
            ],
            vec![Detail {
                id: 1,
                idx: 1,
                attributes: DetailAttributes {
                    img_url: Some("https://img.example/1.png".to_string()),
                    height: Some(json!("0.7m")),
                    ..Default::default()
                },
            }],
        )
    }

    #[test]
    fn test_id_lookup_returns_exact_record() {
        let store = sample_store();
        for e in store.entities() {
            let profile = resolve(&store, &Lookup::Id(e.id)).unwrap();
            assert_eq!(profile.id, e.id);
            assert_eq!(profile.name_en, e.name_en);
        }
    }

    #[test]
    fn test_id_falls_back_to_idx() {
        let store = sample_store();
        // No id 25; group 25 starts with id 4
        let profile = resolve(&store, &Lookup::Id(25)).unwrap();
        assert_eq!(profile.id, 4);
    }

    #[test]
    fn test_unknown_id_not_found() {
        let store = sample_store();
        assert!(resolve(&store, &Lookup::Id(999)).is_none());
    }

    #[test]
    fn test_idx_lookup_first_form_and_all_forms() {
        let store = sample_store();
        let profile = resolve(&store, &Lookup::Idx(1)).unwrap();

        assert_eq!(profile.id, 1);
        assert!(profile.has_multiple_forms);
        let ids: Vec<i64> = profile.all_forms.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(profile.all_forms[1].form.as_deref(), Some("mega"));
    }

    #[test]
    fn test_single_form_group() {
        let store = sample_store();
        let profile = resolve(&store, &Lookup::Idx(4)).unwrap();
        assert!(!profile.has_multiple_forms);
        assert_eq!(profile.all_forms.len(), 1);
    }

    #[test]
    fn test_name_en_substring_prefers_base_form() {
        let store = sample_store();
        let profile = resolve(&store, &Lookup::NameEn("bulb".to_string())).unwrap();
        assert_eq!(profile.id, 1);
    }

    #[test]
    fn test_name_en_exact_match_wins_over_substrings() {
        let store = sample_store();
        let profile = resolve(&store, &Lookup::NameEn("BULBA-MEGA".to_string())).unwrap();
        assert_eq!(profile.id, 2);
    }

    #[test]
    fn test_name_without_base_form_takes_first_candidate() {
        let store = sample_store();
        // Both Pikachu records carry a form; the first in table order wins
        let profile = resolve(&store, &Lookup::NameEn("pika".to_string())).unwrap();
        assert_eq!(profile.id, 4);
    }

    #[test]
    fn test_name_query_containing_record_name() {
        let store = sample_store();
        // Query is longer than the stored name, which it contains
        let profile = resolve(&store, &Lookup::NameEn("Charmander the lizard".to_string())).unwrap();
        assert_eq!(profile.id, 3);
    }

    #[test]
    fn test_name_zh_is_case_sensitive_exact() {
        let store = sample_store();
        let profile = resolve(&store, &Lookup::NameZh("妙蛙种子-超级".to_string())).unwrap();
        assert_eq!(profile.id, 2);

        let profile = resolve(&store, &Lookup::NameZh("妙蛙".to_string())).unwrap();
        assert_eq!(profile.id, 1);
    }

    #[test]
    fn test_name_ja_case_insensitive() {
        let store = sample_store();
        let profile = resolve(&store, &Lookup::NameJa("ヒトカゲ".to_string())).unwrap();
        assert_eq!(profile.id, 3);
    }

    #[test]
    fn test_name_not_found() {
        let store = sample_store();
        assert!(resolve(&store, &Lookup::NameEn("Mewtwo".to_string())).is_none());
    }

    #[test]
    fn test_ambiguous_resolution_is_deterministic() {
        let store = sample_store();
        let lookup = Lookup::NameZh("皮卡".to_string());
        let first = resolve(&store, &lookup).unwrap();
        for _ in 0..10 {
            assert_eq!(resolve(&store, &lookup).unwrap().id, first.id);
        }
    }

    #[test]
    fn test_profile_with_detail_spreads_attributes() {
        let store = sample_store();
        let profile = resolve(&store, &Lookup::Id(1)).unwrap();
        let value = serde_json::to_value(&profile).unwrap();

        assert_eq!(value["img_url"], "https://img.example/1.png");
        assert_eq!(value["height"], "0.7m");
        // Attributes the detail row does not carry are left out
        assert!(!value.as_object().unwrap().contains_key("catch_rate"));
        assert_eq!(value["all_forms"][0]["id"], 1);
    }

    #[test]
    fn test_profile_without_detail_has_no_detail_keys() {
        let store = sample_store();
        let profile = resolve(&store, &Lookup::Id(3)).unwrap();
        let value = serde_json::to_value(&profile).unwrap();
        let obj = value.as_object().unwrap();

        assert!(!obj.contains_key("img_url"));
        assert!(!obj.contains_key("height"));
        assert_eq!(obj["has_multiple_forms"], false);
    }

    #[test]
    fn test_mega_form_shares_group_detail() {
        let store = sample_store();
        // id 2 has no detail of its own; the group entry (idx 1) is used
        let profile = resolve(&store, &Lookup::Id(2)).unwrap();
        assert_eq!(
            profile.detail.unwrap().img_url.as_deref(),
            Some("https://img.example/1.png")
        );
    }

    #[test]
    fn test_from_params_precedence() {
        let lookup = Lookup::from_params(Some("3"), Some("4"), Some("x"), None, None).unwrap();
        assert_eq!(lookup, Some(Lookup::Id(3)));

        let lookup = Lookup::from_params(None, Some("4"), Some("x"), None, None).unwrap();
        assert_eq!(lookup, Some(Lookup::Idx(4)));

        let lookup = Lookup::from_params(None, None, None, Some("en"), Some("ja")).unwrap();
        assert_eq!(lookup, Some(Lookup::NameEn("en".to_string())));

        let lookup = Lookup::from_params(None, None, None, None, Some("ja")).unwrap();
        assert_eq!(lookup, Some(Lookup::NameJa("ja".to_string())));
    }

    #[test]
    fn test_from_params_empty_counts_as_absent() {
        let lookup = Lookup::from_params(Some(""), None, Some("小火龙"), None, None).unwrap();
        assert_eq!(lookup, Some(Lookup::NameZh("小火龙".to_string())));

        assert_eq!(Lookup::from_params(None, None, None, None, None).unwrap(), None);
    }

    #[test]
    fn test_from_params_rejects_non_integer() {
        let err = Lookup::from_params(Some("abc"), None, None, None, None).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = Lookup::from_params(Some(".5"), None, None, None, None).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_from_params_reads_leading_integer() {
        let lookup = Lookup::from_params(Some("1.0"), None, None, None, None).unwrap();
        assert_eq!(lookup, Some(Lookup::Id(1)));

        let lookup = Lookup::from_params(None, Some(" 6abc"), None, None, None).unwrap();
        assert_eq!(lookup, Some(Lookup::Idx(6)));
    }
}
