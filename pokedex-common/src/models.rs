//! Record types for the entity and detail tables

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One row of the entity table (one creature or one of its forms)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable database key, unique per record
    pub id: i64,

    /// Group key shared by every form of one base creature
    pub idx: i64,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub name_zh: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub name_ja: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub name_en: String,

    pub type1: String,

    /// Secondary type, as stored; `None` or `""` when there is none
    #[serde(default)]
    pub type2: Option<String>,

    /// Form name, as stored; `None` or `""` for the base form
    #[serde(default)]
    pub form: Option<String>,

    pub generation: i64,
}

impl Entity {
    /// True for the base (default) form of a group
    pub fn is_base_form(&self) -> bool {
        self.form.as_deref().map_or(true, str::is_empty)
    }

    /// Secondary type, if one is set
    pub fn secondary_type(&self) -> Option<&str> {
        self.type2.as_deref().filter(|t| !t.is_empty())
    }

    /// True if either type slot equals `type_name` exactly
    ///
    /// An empty `type_name` never matches.
    pub fn has_type(&self, type_name: &str) -> bool {
        !type_name.is_empty()
            && (self.type1 == type_name || self.secondary_type() == Some(type_name))
    }
}

/// Reduced view of a sibling form, as listed in `all_forms`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSummary {
    pub id: i64,
    pub type1: String,
    pub type2: Option<String>,
    pub form: Option<String>,
}

impl From<&Entity> for FormSummary {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            type1: entity.type1.clone(),
            type2: entity.type2.clone(),
            form: entity.form.clone(),
        }
    }
}

/// One row of the detail table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detail {
    pub id: i64,
    pub idx: i64,

    #[serde(flatten)]
    pub attributes: DetailAttributes,
}

/// Presentation and biological attributes carried by a detail record
///
/// Values other than `img_url` are passed through exactly as stored, since the
/// source table mixes strings and numbers for measurements and rates. A key the
/// row does not carry is `None` and is left out when serialized; a stored
/// `null` is kept as `Some(Value::Null)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
    #[serde(default, deserialize_with = "stored_value", skip_serializing_if = "Option::is_none")]
    pub category: Option<Value>,
    #[serde(default, deserialize_with = "stored_value", skip_serializing_if = "Option::is_none")]
    pub ability: Option<Value>,
    #[serde(default, deserialize_with = "stored_value", skip_serializing_if = "Option::is_none")]
    pub height: Option<Value>,
    #[serde(default, deserialize_with = "stored_value", skip_serializing_if = "Option::is_none")]
    pub weight: Option<Value>,
    #[serde(default, deserialize_with = "stored_value", skip_serializing_if = "Option::is_none")]
    pub body_style: Option<Value>,
    #[serde(default, deserialize_with = "stored_value", skip_serializing_if = "Option::is_none")]
    pub catch_rate: Option<Value>,
    #[serde(default, deserialize_with = "stored_value", skip_serializing_if = "Option::is_none")]
    pub gender_ratio: Option<Value>,
    #[serde(default, deserialize_with = "stored_value", skip_serializing_if = "Option::is_none")]
    pub egg_group1: Option<Value>,
    #[serde(default, deserialize_with = "stored_value", skip_serializing_if = "Option::is_none")]
    pub egg_group2: Option<Value>,
    #[serde(default, deserialize_with = "stored_value", skip_serializing_if = "Option::is_none")]
    pub hatch_time: Option<Value>,
    #[serde(default, deserialize_with = "stored_value", skip_serializing_if = "Option::is_none")]
    pub effort_value: Option<Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Present keys are always `Some`, including an explicit `null`
fn stored_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_optional_fields_kept_as_stored() {
        let raw = json!({
            "id": 1, "idx": 1,
            "name_zh": "妙蛙种子", "name_ja": "フシギダネ", "name_en": "Bulbasaur",
            "type1": "Grass", "type2": "", "form": "", "generation": 1
        });
        let entity: Entity = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(entity.type2.as_deref(), Some(""));
        assert_eq!(entity.form.as_deref(), Some(""));
        assert_eq!(entity.secondary_type(), None);
        assert!(entity.is_base_form());
        assert_eq!(serde_json::to_value(&entity).unwrap(), raw);
    }

    #[test]
    fn test_missing_and_null_fields() {
        let entity: Entity = serde_json::from_value(json!({
            "id": 7, "idx": 3, "name_zh": null,
            "type1": "Water", "type2": null, "generation": 2
        }))
        .unwrap();

        assert_eq!(entity.name_zh, "");
        assert_eq!(entity.name_en, "");
        assert_eq!(entity.type2, None);
        assert_eq!(entity.form, None);
        assert!(entity.is_base_form());
    }

    #[test]
    fn test_named_form_is_not_base() {
        let entity: Entity = serde_json::from_value(json!({
            "id": 10, "idx": 6, "type1": "Fire", "form": "mega-x", "generation": 6
        }))
        .unwrap();
        assert!(!entity.is_base_form());
    }

    #[test]
    fn test_has_type_checks_both_slots() {
        let entity: Entity = serde_json::from_value(json!({
            "id": 6, "idx": 6, "type1": "Fire", "type2": "Flying", "generation": 1
        }))
        .unwrap();

        assert!(entity.has_type("Fire"));
        assert!(entity.has_type("Flying"));
        assert!(!entity.has_type("fire"));
        assert!(!entity.has_type(""));
    }

    #[test]
    fn test_detail_attributes_keep_stored_values() {
        let detail: Detail = serde_json::from_value(json!({
            "id": 1, "idx": 1,
            "img_url": "https://img.example/1.png",
            "height": "0.7m", "catch_rate": 45
        }))
        .unwrap();

        assert_eq!(detail.attributes.img_url.as_deref(), Some("https://img.example/1.png"));
        assert_eq!(detail.attributes.height, Some(json!("0.7m")));
        assert_eq!(detail.attributes.catch_rate, Some(json!(45)));
        assert_eq!(detail.attributes.ability, None);
    }

    #[test]
    fn test_detail_attributes_serialize_only_stored_keys() {
        let detail: Detail = serde_json::from_value(json!({
            "id": 1, "idx": 1, "img_url": "a.png", "category": null
        }))
        .unwrap();

        assert_eq!(detail.attributes.category, Some(Value::Null));
        assert_eq!(
            serde_json::to_value(&detail.attributes).unwrap(),
            json!({"img_url": "a.png", "category": null})
        );
    }
}
