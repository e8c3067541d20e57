//! Display content for the dashboard. Icons and images are referenced by name;
//! the front end resolves them.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventType {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub image: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vendor {
    pub name: &'static str,
    pub service: &'static str,
    pub rating: f32,
    pub image: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AiTool {
    pub title: &'static str,
    pub description: &'static str,
    pub link: &'static str,
    pub image: &'static str,
}

static EVENT_TYPES: [EventType; 4] = [
    EventType {
        title: "Weddings",
        description: "Create the perfect day with our expert vendors.",
        icon: "heart",
        image: "event-wedding",
    },
    EventType {
        title: "Corporate Events",
        description: "Professional, seamless events for your business.",
        icon: "briefcase",
        image: "event-corporate",
    },
    EventType {
        title: "Birthdays",
        description: "Celebrate another year in style.",
        icon: "cake",
        image: "event-birthday",
    },
    EventType {
        title: "Social Gatherings",
        description: "Host unforgettable parties and get-togethers.",
        icon: "party-popper",
        image: "event-social",
    },
];

static FEATURED_VENDORS: [Vendor; 4] = [
    Vendor {
        name: "Gourmet Delights",
        service: "Catering",
        rating: 4.9,
        image: "vendor-caterer",
    },
    Vendor {
        name: "Everlasting Moments",
        service: "Photography",
        rating: 4.8,
        image: "vendor-photographer",
    },
    Vendor {
        name: "The Grand Hall",
        service: "Venue",
        rating: 5.0,
        image: "vendor-venue",
    },
    Vendor {
        name: "Rhythm Masters",
        service: "DJ Services",
        rating: 4.7,
        image: "vendor-dj",
    },
];

static AI_TOOLS: [AiTool; 3] = [
    AiTool {
        title: "AI Menu Planner",
        description: "Get intelligent menu suggestions based on your event, budget, and guest preferences.",
        link: "/tools",
        image: "tool-menu",
    },
    AiTool {
        title: "AI Décor Recommender",
        description: "Discover the perfect décor themes that match your style and venue, all within budget.",
        link: "/tools",
        image: "tool-decor",
    },
    AiTool {
        title: "Vendor Demand Analysis",
        description: "For our vendors: Optimize your pricing and offerings with AI-powered market insights.",
        link: "/tools",
        image: "tool-demand",
    },
];

pub fn event_types() -> &'static [EventType] {
    &EVENT_TYPES
}

pub fn featured_vendors() -> &'static [Vendor] {
    &FEATURED_VENDORS
}

pub fn ai_tools() -> &'static [AiTool] {
    &AI_TOOLS
}

/// Everything the dashboard page shows, in one payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub event_types: &'static [EventType],
    pub featured_vendors: &'static [Vendor],
    pub ai_tools: &'static [AiTool],
}

impl Dashboard {
    pub fn load() -> Self {
        Self {
            event_types: event_types(),
            featured_vendors: featured_vendors(),
            ai_tools: ai_tools(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_serializes_with_camel_case_sections() {
        let value = serde_json::to_value(Dashboard::load()).unwrap();
        assert_eq!(value["eventTypes"].as_array().unwrap().len(), 4);
        assert_eq!(value["featuredVendors"][2]["name"], "The Grand Hall");
        assert_eq!(value["aiTools"][1]["title"], "AI Décor Recommender");
    }

    #[test]
    fn vendor_ratings_are_out_of_five() {
        assert!(featured_vendors()
            .iter()
            .all(|v| (0.0..=5.0).contains(&v.rating)));
    }
}
