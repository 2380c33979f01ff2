// Wire models for the Inkpress runtime API.
//
// Discovery payloads are not stable across provider accounts: the
// categories endpoint alone has shipped three different shapes. Parsing is
// a tagged-variant attempt in declaration order rather than cascading
// conditionals, and anything unrecognized degrades to an empty result.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One design category, unique by `id` within a tenant.
///
/// Set semantics; the provider's ordering is opaque and may change
/// between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
}

/// One design. The category it was fetched through is the fetch key, not
/// a stored field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Design {
    #[serde(rename = "designId")]
    pub design_id: String,
    pub title: String,
}

/// Raw design record as the provider ships it; the display name may live
/// in any of several optional fields.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawDesign {
    #[serde(rename = "designId")]
    design_id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "designName", default)]
    design_name: Option<String>,
}

impl RawDesign {
    /// Resolve a display title through the fallback chain `title`, `name`,
    /// `designName`, and finally the design id. Never empty.
    pub(crate) fn into_design(self) -> Design {
        let title = [self.title, self.name, self.design_name]
            .into_iter()
            .flatten()
            .find(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.design_id.clone());
        Design {
            design_id: self.design_id,
            title,
        }
    }
}

/// The categories payload in any of its observed shapes.
///
/// Variants are tried in declaration order:
/// 1. `Records` -- an array of `{id, title}` objects
/// 2. `Titles` -- a map of id to title
/// 3. `Envelope` -- a nested `{data: {values: [...]}}` wrapper
/// 4. `Unrecognized` -- anything else; yields no categories
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CategoriesPayload {
    Records(Vec<Category>),
    Titles(BTreeMap<String, String>),
    Envelope { data: CategoryValues },
    Unrecognized(serde_json::Value),
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryValues {
    #[serde(default)]
    values: Vec<Category>,
}

impl CategoriesPayload {
    /// Parse any JSON payload. Infallible: the catch-all variant absorbs
    /// shapes the other parsers reject.
    pub(crate) fn parse(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or(Self::Unrecognized(serde_json::Value::Null))
    }

    /// True when no parser recognized the payload.
    pub(crate) fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }

    /// Flatten to a category list.
    pub(crate) fn into_categories(self) -> Vec<Category> {
        match self {
            Self::Records(categories) => categories,
            Self::Titles(map) => map
                .into_iter()
                .map(|(id, title)| Category { id, title })
                .collect(),
            Self::Envelope { data } => data.values,
            Self::Unrecognized(_) => Vec::new(),
        }
    }
}

/// Envelope for `fetch-designs`; either nesting level may be absent.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DesignsEnvelope {
    #[serde(default)]
    data: Option<DesignsData>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DesignsData {
    #[serde(default)]
    items: Option<Vec<RawDesign>>,
}

impl DesignsEnvelope {
    /// Flatten to a design list; a missing `data` or `items` level means
    /// zero designs, not an error.
    pub(crate) fn into_designs(self) -> Vec<Design> {
        self.data
            .and_then(|d| d.items)
            .unwrap_or_default()
            .into_iter()
            .map(RawDesign::into_design)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn category(id: &str, title: &str) -> Category {
        Category {
            id: id.into(),
            title: title.into(),
        }
    }

    // ── Categories shapes ────────────────────────────────────────

    #[test]
    fn record_array_shape_is_parsed() {
        let payload = CategoriesPayload::parse(json!([
            {"id": "cards", "title": "Business Cards"},
            {"id": "flyers", "title": "Flyers"},
        ]));
        assert_eq!(
            payload.into_categories(),
            vec![
                category("cards", "Business Cards"),
                category("flyers", "Flyers")
            ]
        );
    }

    #[test]
    fn title_map_shape_is_parsed_in_key_order() {
        let payload = CategoriesPayload::parse(json!({
            "flyers": "Flyers",
            "cards": "Business Cards",
        }));
        assert_eq!(
            payload.into_categories(),
            vec![
                category("cards", "Business Cards"),
                category("flyers", "Flyers")
            ]
        );
    }

    #[test]
    fn nested_envelope_shape_is_parsed() {
        let payload = CategoriesPayload::parse(json!({
            "data": {"values": [{"id": "cards", "title": "Business Cards"}]}
        }));
        assert_eq!(
            payload.into_categories(),
            vec![category("cards", "Business Cards")]
        );
    }

    #[test]
    fn empty_array_is_zero_categories_not_unrecognized() {
        let payload = CategoriesPayload::parse(json!([]));
        assert!(!payload.is_unrecognized());
        assert_eq!(payload.into_categories(), Vec::new());
    }

    #[test]
    fn unrecognized_shapes_yield_no_categories() {
        for value in [json!(42), json!("nope"), json!(["a", "b"]), json!(null)] {
            let payload = CategoriesPayload::parse(value.clone());
            assert!(payload.is_unrecognized(), "expected unrecognized: {value}");
            assert_eq!(payload.into_categories(), Vec::new());
        }
    }

    #[test]
    fn envelope_with_missing_values_is_empty() {
        let payload = CategoriesPayload::parse(json!({"data": {}}));
        assert_eq!(payload.into_categories(), Vec::new());
    }

    // ── Designs envelope ─────────────────────────────────────────

    fn designs_of(value: serde_json::Value) -> Vec<Design> {
        serde_json::from_value::<DesignsEnvelope>(value)
            .unwrap()
            .into_designs()
    }

    #[test]
    fn missing_data_level_is_zero_designs() {
        assert_eq!(designs_of(json!({})), Vec::new());
        assert_eq!(designs_of(json!({"data": null})), Vec::new());
    }

    #[test]
    fn missing_items_level_is_zero_designs() {
        assert_eq!(designs_of(json!({"data": {}})), Vec::new());
        assert_eq!(designs_of(json!({"data": {"items": null}})), Vec::new());
    }

    #[test]
    fn designs_keep_provider_order() {
        let designs = designs_of(json!({
            "data": {"items": [
                {"designId": "d2", "title": "Second"},
                {"designId": "d1", "title": "First"},
            ]}
        }));
        assert_eq!(designs[0].design_id, "d2");
        assert_eq!(designs[1].design_id, "d1");
    }

    // ── Title fallback chain ─────────────────────────────────────

    #[test]
    fn title_field_wins_when_present() {
        let designs = designs_of(json!({
            "data": {"items": [
                {"designId": "d1", "title": "Front", "name": "ignored"}
            ]}
        }));
        assert_eq!(designs[0].title, "Front");
    }

    #[test]
    fn name_and_design_name_fill_in_for_missing_title() {
        let designs = designs_of(json!({
            "data": {"items": [
                {"designId": "d1", "name": "By Name"},
                {"designId": "d2", "designName": "By Design Name"},
            ]}
        }));
        assert_eq!(designs[0].title, "By Name");
        assert_eq!(designs[1].title, "By Design Name");
    }

    #[test]
    fn design_without_any_title_falls_back_to_its_id() {
        let designs = designs_of(json!({"data": {"items": [{"designId": "d9"}]}}));
        assert_eq!(designs[0].title, "d9");
    }

    #[test]
    fn blank_title_is_not_usable() {
        let designs = designs_of(json!({
            "data": {"items": [{"designId": "d1", "title": "  ", "name": "Real"}]}
        }));
        assert_eq!(designs[0].title, "Real");
    }
}
