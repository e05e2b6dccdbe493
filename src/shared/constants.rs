/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - manages users, services and all pickups/reports
pub const ROLE_ADMIN: &str = "admin";

/// Citizen role - schedules pickups and reports litter
pub const ROLE_CITIZEN: &str = "citizen";

/// Collector role - fulfils pickups and reports within an assigned city
pub const ROLE_COLLECTOR: &str = "collector";

// =============================================================================
// FIELD LIMITS
// =============================================================================

/// Minimum length of a litter report description
pub const MIN_REPORT_DESCRIPTION_LENGTH: u64 = 10;

/// Maximum length of free-text notes and descriptions
pub const MAX_FREE_TEXT_LENGTH: u64 = 2000;

/// Maximum number of images attached to a litter report
pub const MAX_REPORT_IMAGES: u64 = 10;
