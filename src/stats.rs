// 📊 Status Statistics - Per-company ticket and device counts
//
// Vendor status fields are free text ("Open", "On Hold - Pending Parts",
// "Offline for 3 days"), so categorization is substring-based with a
// fixed precedence order. The overview report bundles the filtered
// collections' counts with the resolved name and a generation timestamp.

use crate::filter::{CompanyFilter, DeviceRecord, SiteRecord, TicketRecord};
use serde::{Deserialize, Serialize};

// ============================================================================
// TICKET STATUS CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatusCategory {
    Open,
    Closed,
    Resolved,
    Pending,
    InProgress,
    Other,
}

impl TicketStatusCategory {
    /// Categorize a free-text status name.
    ///
    /// Case-insensitive substring checks in fixed precedence order:
    /// open, closed, resolved, pending, then progress/assigned.
    /// "Reopened" therefore counts as Open, and "Pending Closure" as
    /// Pending only because "closed" does not occur in it.
    pub fn categorize(status_name: &str) -> Self {
        let status = status_name.to_lowercase();

        if status.contains("open") {
            TicketStatusCategory::Open
        } else if status.contains("closed") {
            TicketStatusCategory::Closed
        } else if status.contains("resolved") {
            TicketStatusCategory::Resolved
        } else if status.contains("pending") {
            TicketStatusCategory::Pending
        } else if status.contains("progress") || status.contains("assigned") {
            TicketStatusCategory::InProgress
        } else {
            TicketStatusCategory::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatusCategory::Open => "Open",
            TicketStatusCategory::Closed => "Closed",
            TicketStatusCategory::Resolved => "Resolved",
            TicketStatusCategory::Pending => "Pending",
            TicketStatusCategory::InProgress => "In Progress",
            TicketStatusCategory::Other => "Other",
        }
    }
}

// ============================================================================
// TICKET / DEVICE STATS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketStats {
    pub total_tickets: usize,
    pub open_tickets: usize,
    pub closed_tickets: usize,
    pub resolved_tickets: usize,
    pub pending_tickets: usize,
    pub in_progress_tickets: usize,
    pub other_tickets: usize,
}

impl TicketStats {
    pub fn from_tickets(tickets: &[TicketRecord]) -> Self {
        let mut stats = TicketStats {
            total_tickets: tickets.len(),
            ..TicketStats::default()
        };

        for ticket in tickets {
            match TicketStatusCategory::categorize(&ticket.status) {
                TicketStatusCategory::Open => stats.open_tickets += 1,
                TicketStatusCategory::Closed => stats.closed_tickets += 1,
                TicketStatusCategory::Resolved => stats.resolved_tickets += 1,
                TicketStatusCategory::Pending => stats.pending_tickets += 1,
                TicketStatusCategory::InProgress => stats.in_progress_tickets += 1,
                TicketStatusCategory::Other => stats.other_tickets += 1,
            }
        }

        stats
    }

    /// Closed and resolved together, as the dashboard displays them.
    pub fn completed_tickets(&self) -> usize {
        self.closed_tickets + self.resolved_tickets
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceStats {
    pub total_devices: usize,
    pub online_devices: usize,
    pub offline_devices: usize,
}

impl DeviceStats {
    pub fn from_devices(devices: &[DeviceRecord]) -> Self {
        let online = devices.iter().filter(|d| d.is_online()).count();
        DeviceStats {
            total_devices: devices.len(),
            online_devices: online,
            offline_devices: devices.len() - online,
        }
    }
}

// ============================================================================
// COMPANY OVERVIEW
// ============================================================================

/// One company's dashboard numbers, built from freshly-fetched pools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyOverview {
    /// The identity the caller asked about.
    pub company: String,

    /// Pool name the matcher resolved it to (the company itself when
    /// nothing qualified).
    pub matched_name: String,
    pub match_score: f64,

    pub tickets: TicketStats,
    pub devices: DeviceStats,
    pub total_sites: usize,

    pub generated_at: chrono::DateTime<chrono::Utc>,
}

impl CompanyOverview {
    pub fn build(
        filter: &CompanyFilter,
        company: &str,
        tickets: &[TicketRecord],
        devices: &[DeviceRecord],
        sites: &[SiteRecord],
    ) -> Self {
        let pool = CompanyFilter::account_names(tickets);
        let (matched_name, match_score) = filter.matcher().resolve(company, &pool);

        let company_tickets = filter.filter_tickets(company, tickets);
        let company_devices = filter.filter_devices(company, devices);
        let company_sites = filter.filter_sites(company, sites);

        CompanyOverview {
            company: company.to_string(),
            matched_name,
            match_score,
            tickets: TicketStats::from_tickets(&company_tickets),
            devices: DeviceStats::from_devices(&company_devices),
            total_sites: company_sites.len(),
            generated_at: chrono::Utc::now(),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} (matched '{}'): {} tickets ({} open), {} devices ({} online), {} sites",
            self.company,
            self.matched_name,
            self.tickets.total_tickets,
            self.tickets.open_tickets,
            self.devices.total_devices,
            self.devices.online_devices,
            self.total_sites
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
