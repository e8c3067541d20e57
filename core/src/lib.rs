//! Core of the Vencorpia event-planning tools: typed tool inputs and outputs,
//! prompt templates, the model and image boundaries, the three flows and the
//! form state machine that drives them.

pub mod catalog;
pub mod config;
pub mod error;
pub mod flows;
pub mod form;
pub mod llm;
pub mod prompt;
pub mod registry;
pub mod validate;

pub use error::FlowError;
pub use flows::Flow;
