//! Built-in connector implementations.
//!
//! One file per external service. Connectors return structured placeholder
//! data for actions — real third-party business logic lives outside this
//! service. OpenAI is the exception: its auth check goes over the wire.

pub mod ahrefs;
pub mod dataforseo;
pub mod google_ads;
pub mod google_analytics;
pub mod openai;
pub mod rankmath;

pub use ahrefs::AhrefsConnector;
pub use dataforseo::DataForSeoConnector;
pub use google_ads::GoogleAdsConnector;
pub use google_analytics::GoogleAnalyticsConnector;
pub use openai::OpenAiConnector;
pub use rankmath::RankMathConnector;
