//! The three tool flows. Each one validates its input, renders a fixed prompt,
//! calls the model once and hands back the coerced output.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::FlowError;
use crate::validate::Validate;

pub mod decor;
pub mod demand;
pub mod menu;

pub use decor::{DecorFlow, DecorRecommendationsInput, DecorRecommendationsOutput, NO_IMAGE_AVAILABLE};
pub use demand::{DemandFlow, VendorDemandInput, VendorDemandOutput};
pub use menu::{MenuFlow, MenuSuggestionsInput, MenuSuggestionsOutput};

#[async_trait]
pub trait Flow: Send + Sync {
    type Input: Validate + Clone + Serialize + DeserializeOwned + JsonSchema + Default + Send + Sync;
    type Output: Serialize + Send;

    fn name(&self) -> &'static str;

    async fn run(&self, input: Self::Input) -> Result<Self::Output, FlowError>;
}
