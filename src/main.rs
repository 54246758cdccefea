// Company Reconciliation CLI
//
// Offline inspection of reconciliation quality against exported pools:
//   company-matcher match <target> <candidates.csv> [--json]
//   company-matcher report <company> <tickets.csv> <devices.csv> [<sites.csv>] [--json]

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use std::env;
use std::path::Path;

use company_matcher::{
    CompanyFilter, CompanyMatcher, CompanyOverview, DeviceRecord, SiteRecord, TicketRecord,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("match") => run_match(&args[2..]),
        Some("report") => run_report(&args[2..]),
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("Company Reconciliation CLI v{}", company_matcher::VERSION);
    println!();
    println!("Usage:");
    println!("  company-matcher match <target> <candidates.csv> [--json]");
    println!("  company-matcher report <company> <tickets.csv> <devices.csv> [<sites.csv>] [--json]");
    println!();
    println!("CSV columns:");
    println!("  candidates: name");
    println!("  tickets:    id,subject,description,account_name,site_name,status");
    println!("  devices:    name,organization_name,site_name,uptime");
    println!("  sites:      name");
}

fn run_match(args: &[String]) -> Result<()> {
    let (json, args) = split_json_flag(args);
    let [target, candidates_path] = args.as_slice() else {
        bail!("usage: company-matcher match <target> <candidates.csv> [--json]");
    };

    let candidates = load_names(Path::new(candidates_path))?;
    let matcher = CompanyMatcher::new();

    let result = matcher.find_best_match(target, &candidates);
    let (resolved, resolved_score) = matcher.resolve(target, &candidates);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("🎯 Matching '{}' against {} candidates", target, candidates.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    match &result.candidate {
        Some(name) => println!("✓ Best match: '{}' (score {:.3})", name, result.score),
        None => println!("✗ No candidate cleared the threshold"),
    }
    println!("  Resolved key: '{}' (score {:.3})", resolved, resolved_score);

    Ok(())
}

fn run_report(args: &[String]) -> Result<()> {
    let (json, args) = split_json_flag(args);
    let (company, tickets_path, devices_path, sites_path) = match args.as_slice() {
        [company, tickets, devices] => (company, tickets, devices, None),
        [company, tickets, devices, sites] => (company, tickets, devices, Some(sites)),
        _ => bail!(
            "usage: company-matcher report <company> <tickets.csv> <devices.csv> [<sites.csv>] [--json]"
        ),
    };

    let tickets: Vec<TicketRecord> = load_records(Path::new(tickets_path))?;
    let devices: Vec<DeviceRecord> = load_records(Path::new(devices_path))?;
    let sites: Vec<SiteRecord> = match sites_path {
        Some(path) => load_records(Path::new(path))?,
        None => Vec::new(),
    };

    let filter = CompanyFilter::new();
    let overview = CompanyOverview::build(&filter, company, &tickets, &devices, &sites);

    if json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
        return Ok(());
    }

    println!("📊 Company report: {}", overview.company);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "  Matched pool name: '{}' (score {:.3})",
        overview.matched_name, overview.match_score
    );
    println!(
        "  Tickets: {} total / {} open / {} pending / {} in progress / {} completed",
        overview.tickets.total_tickets,
        overview.tickets.open_tickets,
        overview.tickets.pending_tickets,
        overview.tickets.in_progress_tickets,
        overview.tickets.completed_tickets()
    );
    println!(
        "  Devices: {} total / {} online / {} offline",
        overview.devices.total_devices,
        overview.devices.online_devices,
        overview.devices.offline_devices
    );
    println!("  Sites:   {}", overview.total_sites);

    Ok(())
}

/// Pop a trailing/leading --json flag out of the argument list.
fn split_json_flag(args: &[String]) -> (bool, Vec<String>) {
    let json = args.iter().any(|a| a == "--json");
    let rest = args.iter().filter(|a| *a != "--json").cloned().collect();
    (json, rest)
}

/// Load a single-column name pool (header row "name" optional).
fn load_names(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("bad row in {}", path.display()))?;
        if let Some(name) = record.get(0) {
            let name = name.trim();
            if !name.is_empty() && name != "name" {
                names.push(name.to_string());
            }
        }
    }

    Ok(names)
}

/// Load serde-deserializable records from a headered CSV file.
fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut records = Vec::new();
    for record in reader.deserialize() {
        let record: T = record.with_context(|| format!("bad row in {}", path.display()))?;
        records.push(record);
    }

    Ok(records)
}
