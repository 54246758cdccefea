// 🧹 Company Filter - Select the records that belong to one company
//
// The matcher identifies ONE canonical name; it never filters collections.
// This layer re-applies the scorer per record, the way the portal's ticket
// and device pages do:
// - direct similarity of the company against the record's grouping names
// - similarity of the RESOLVED pool name against the grouping name, with a
//   stricter cutoff (this is what lets a mapping-table hit pull in records
//   the direct score would miss)
// - for tickets, a literal case-insensitive mention in subject/description
//
// Record structs carry only the already-extracted string fields; vendor
// JSON shapes never reach this crate.

use crate::matcher::CompanyMatcher;
use crate::similarity::similarity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-record cutoff for direct similarity (strictly greater-than).
pub const RECORD_CUTOFF: f64 = 0.6;

/// Per-record cutoff against the resolved pool name (strictly greater-than).
pub const RESOLVED_CUTOFF: f64 = 0.8;

// ============================================================================
// EXTRACTED RECORDS
// ============================================================================

/// A helpdesk ticket, reduced to the fields filtering needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
    /// The helpdesk's free-text "account" grouping name.
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub site_name: String,
    /// Free-text status name ("Open", "On Hold - Pending Parts", ...).
    #[serde(default)]
    pub status: String,
}

/// An RMM device, reduced to the fields filtering needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub name: String,
    /// The RMM's free-text "organization" grouping name.
    #[serde(default)]
    pub organization_name: String,
    #[serde(default)]
    pub site_name: String,
    /// Free-text uptime description ("Up 12 days", "Offline for 3 days").
    #[serde(default)]
    pub uptime: String,
}

impl DeviceRecord {
    /// A device is online when its uptime text is present and does not
    /// say Offline.
    pub fn is_online(&self) -> bool {
        !self.uptime.is_empty() && !self.uptime.contains("Offline")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub name: String,
}

// ============================================================================
// COMPANY FILTER
// ============================================================================

/// Filters extracted vendor records down to one company's records.
#[derive(Debug, Clone, Default)]
pub struct CompanyFilter {
    matcher: CompanyMatcher,
}

impl CompanyFilter {
    /// Filter backed by the default matcher (curated mappings, 0.6).
    pub fn new() -> Self {
        CompanyFilter {
            matcher: CompanyMatcher::new(),
        }
    }

    pub fn with_matcher(matcher: CompanyMatcher) -> Self {
        CompanyFilter { matcher }
    }

    pub fn matcher(&self) -> &CompanyMatcher {
        &self.matcher
    }

    /// Sorted, deduped pool of non-empty account names across tickets.
    pub fn account_names(tickets: &[TicketRecord]) -> Vec<String> {
        tickets
            .iter()
            .map(|t| t.account_name.as_str())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted, deduped pool of non-empty organization names across devices.
    pub fn organization_names(devices: &[DeviceRecord]) -> Vec<String> {
        devices
            .iter()
            .map(|d| d.organization_name.as_str())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Tickets belonging to `company`.
    ///
    /// A ticket qualifies when the company scores above 0.6 against its
    /// account or site name, the resolved pool name scores above 0.8
    /// against its account name, or the company is mentioned verbatim in
    /// the subject or description. An empty company matches nothing.
    pub fn filter_tickets(&self, company: &str, tickets: &[TicketRecord]) -> Vec<TicketRecord> {
        let pool = Self::account_names(tickets);
        let (resolved, _) = self.matcher.resolve(company, &pool);
        let mention = company.trim().to_lowercase();

        tickets
            .iter()
            .filter(|ticket| {
                similarity(company, &ticket.account_name) > RECORD_CUTOFF
                    || similarity(company, &ticket.site_name) > RECORD_CUTOFF
                    || similarity(&resolved, &ticket.account_name) > RESOLVED_CUTOFF
                    || (!mention.is_empty()
                        && (ticket.subject.to_lowercase().contains(&mention)
                            || ticket.description.to_lowercase().contains(&mention)))
            })
            .cloned()
            .collect()
    }

    /// Devices belonging to `company`, resolved against the organization
    /// pool. Same cutoffs as tickets, minus the text-mention check.
    pub fn filter_devices(&self, company: &str, devices: &[DeviceRecord]) -> Vec<DeviceRecord> {
        let pool = Self::organization_names(devices);
        let (resolved, _) = self.matcher.resolve(company, &pool);

        devices
            .iter()
            .filter(|device| {
                similarity(company, &device.organization_name) > RECORD_CUTOFF
                    || similarity(company, &device.site_name) > RECORD_CUTOFF
                    || similarity(&resolved, &device.organization_name) > RESOLVED_CUTOFF
            })
            .cloned()
            .collect()
    }

    /// Sites belonging to `company` (direct similarity only).
    pub fn filter_sites(&self, company: &str, sites: &[SiteRecord]) -> Vec<SiteRecord> {
        sites
            .iter()
            .filter(|site| similarity(company, &site.name) > RECORD_CUTOFF)
            .cloned()
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
