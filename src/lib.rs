// Company Reconciliation Core - Library
// Exposes all modules for use in the CLI and tests

pub mod filter;
pub mod mapping;
pub mod matcher;
pub mod normalize;
pub mod similarity;
pub mod stats;

// Re-export commonly used items
pub use filter::{
    CompanyFilter, DeviceRecord, SiteRecord, TicketRecord, RECORD_CUTOFF, RESOLVED_CUTOFF,
};
pub use mapping::MappingTable;
pub use matcher::{CompanyMatcher, MatchResult, DEFAULT_THRESHOLD, MAPPING_CUTOFF};
pub use normalize::{normalize, LEGAL_SUFFIXES};
pub use similarity::similarity;
pub use stats::{CompanyOverview, DeviceStats, TicketStats, TicketStatusCategory};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
