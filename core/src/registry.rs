use serde::Serialize;
use serde_json::Value;

use crate::flows::decor::{OCCASION_TONES, VENUE_SIZES};
use crate::flows::{DecorRecommendationsInput, MenuSuggestionsInput, VendorDemandInput};
use crate::prompt::json_schema;

// The shape a client needs to render one tool form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRecord {
    pub name: String,
    pub title: String,
    pub description: String,
    pub endpoint: String,
    pub flow: String,

    // JSON Schema of the input record, so the client knows the field types.
    pub input_schema: Value,
    pub defaults: Value,

    // Suggested values for select-style fields, keyed by field name.
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub options: serde_json::Map<String, Value>,
}

pub struct Registry;

impl Registry {
    /// The three tools, in the order the tools page shows them.
    pub fn load() -> Vec<ToolRecord> {
        let mut decor_options = serde_json::Map::new();
        decor_options.insert("venueSize".to_string(), Value::from(VENUE_SIZES.to_vec()));
        decor_options.insert("occasionTone".to_string(), Value::from(OCCASION_TONES.to_vec()));

        vec![
            ToolRecord {
                name: "menu".to_string(),
                title: "AI Menu Planner".to_string(),
                description: "Get catering suggestions tailored to your event.".to_string(),
                endpoint: "/tools/menu".to_string(),
                flow: "generateMenuSuggestionsFlow".to_string(),
                input_schema: json_schema::<MenuSuggestionsInput>(),
                defaults: defaults::<MenuSuggestionsInput>(),
                options: serde_json::Map::new(),
            },
            ToolRecord {
                name: "decor".to_string(),
                title: "AI Décor Recommender".to_string(),
                description: "Let our AI designer envision the perfect look for your event.".to_string(),
                endpoint: "/tools/decor".to_string(),
                flow: "provideDecorRecommendationsFlow".to_string(),
                input_schema: json_schema::<DecorRecommendationsInput>(),
                defaults: defaults::<DecorRecommendationsInput>(),
                options: decor_options,
            },
            ToolRecord {
                name: "demand".to_string(),
                title: "Vendor Demand Analyzer".to_string(),
                description: "Get AI-powered insights into your market demand and pricing.".to_string(),
                endpoint: "/tools/demand".to_string(),
                flow: "analyzeVendorDemandFlow".to_string(),
                input_schema: json_schema::<VendorDemandInput>(),
                defaults: defaults::<VendorDemandInput>(),
                options: serde_json::Map::new(),
            },
        ]
    }
}

fn defaults<T: Default + Serialize>() -> Value {
    serde_json::to_value(T::default()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_three_tools_with_schemas_and_defaults() {
        let tools = Registry::load();
        let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["menu", "decor", "demand"]);

        let menu = &tools[0];
        assert_eq!(menu.defaults["numberOfGuests"], 50);
        assert_eq!(menu.defaults["culturalPreferences"], "Italian");
        assert!(menu.input_schema["properties"]["budget"].is_object());
    }

    #[test]
    fn decor_exposes_select_options() {
        let tools = Registry::load();
        let decor = tools.iter().find(|t| t.name == "decor").unwrap();
        assert_eq!(decor.options["venueSize"][2], "Large");
        assert_eq!(decor.options["occasionTone"].as_array().unwrap().len(), 5);

        let json = serde_json::to_value(&tools[0]).unwrap();
        assert!(json.get("options").is_none());
        assert_eq!(json["endpoint"], "/tools/menu");
    }
}
