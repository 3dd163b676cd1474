mod analytics;
mod auth;

pub use analytics::ANALYTICS_LIMIT;
pub use analytics::listening_analytics;
pub use analytics::listening_stats;
pub use auth::TokenManager;
