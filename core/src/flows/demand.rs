use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Flow;
use crate::error::FlowError;
use crate::llm::PromptExecutor;
use crate::prompt::Prompt;
use crate::validate::{Checks, FieldError, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorDemandInput {
    /// A description of the services offered by the vendor.
    pub vendor_services: String,
    /// The location where the vendor operates.
    pub vendor_location: String,
    /// Historical booking data for the vendor, including dates, times, and prices.
    pub historical_booking_data: String,
    /// Current market trends in the event industry.
    pub market_trends: String,
}

impl Default for VendorDemandInput {
    fn default() -> Self {
        Self {
            vendor_services: "High-end wedding photography and videography.".to_string(),
            vendor_location: "San Francisco, CA".to_string(),
            historical_booking_data: "Bookings peak in June and September. Higher demand for weekend packages. Average price per booking: $4000.".to_string(),
            market_trends: "Growing interest in cinematic wedding videos and drone photography. Micro-weddings are becoming more popular.".to_string(),
        }
    }
}

impl Validate for VendorDemandInput {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Checks::new()
            .not_blank("vendorServices", &self.vendor_services, "Services description is required.")
            .not_blank("vendorLocation", &self.vendor_location, "Location is required.")
            .not_blank(
                "historicalBookingData",
                &self.historical_booking_data,
                "Historical data is required.",
            )
            .not_blank("marketTrends", &self.market_trends, "Market trends are required.")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorDemandOutput {
    /// An analysis of the demand for the vendor services, including peak seasons and popular services.
    pub demand_analysis: String,
    /// Pricing guidance for the vendor, including recommended prices for different services and times of the year.
    pub pricing_guidance: String,
    /// Suggestions for optimizing the vendor offerings, such as adding new services or targeting specific customer segments.
    pub suggested_optimizations: String,
}

const DEMAND_PROMPT: Prompt<VendorDemandInput, VendorDemandOutput> = Prompt::new(
    "analyzeVendorDemandPrompt",
    r#"You are an AI assistant designed to analyze vendor demand and provide pricing guidance.

Analyze the following information to provide insights to the vendor.

Vendor Services: {{{vendorServices}}}
Vendor Location: {{{vendorLocation}}}
Historical Booking Data: {{{historicalBookingData}}}
Market Trends: {{{marketTrends}}}

Provide a detailed analysis of the demand for the vendor services, pricing guidance, and suggestions for optimizing the vendor offerings. Your suggestions should take into account the vendor's location, services, historical booking data, and current market trends.
Demand Analysis:
Pricing Guidance:
Suggested Optimizations:"#,
);

pub struct DemandFlow {
    executor: Arc<dyn PromptExecutor>,
}

impl DemandFlow {
    pub fn new(executor: Arc<dyn PromptExecutor>) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl Flow for DemandFlow {
    type Input = VendorDemandInput;
    type Output = VendorDemandOutput;

    fn name(&self) -> &'static str {
        "analyzeVendorDemandFlow"
    }

    async fn run(&self, input: VendorDemandInput) -> Result<VendorDemandOutput, FlowError> {
        input.validate()?;
        DEMAND_PROMPT.call(self.executor.as_ref(), &input).await
    }
}
