//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The page with the totals, charts and history of all records.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for entering a new record.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route that renders the category options for a record kind.
pub const CATEGORY_OPTIONS: &str = "/api/categories";
/// The route to append a record.
pub const RECORDS_API: &str = "/api/records";
/// The route for the totals as JSON.
pub const SUMMARY_API: &str = "/api/summary";
