//! cambridge — end-to-end run of the coverage and site-scoring engine.
//!
//! Builds a synthetic street grid over central Cambridge, joins five areal
//! units to an embedded census table, then:
//!
//! 1. computes population coverage around an existing service point, and
//! 2. ranks three candidate sites for a new one.
//!
//! Set `RUST_LOG=debug` to see per-search detail.

mod demand;
mod network;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sc_core::{Deadline, GeoPoint, ScoringConfig, Speed, miles_to_metres};
use sc_demand::DemandSource;
use sc_score::{
    SiteOptions, StaticGeocoder, TravelTimes, candidates_from_addresses, compute_coverage,
    compute_site_scores, locate,
};
use sc_spatial::RoadNetworkHandle;

use demand::demand_source;
use network::{REGION, build_network};

// ── Constants ─────────────────────────────────────────────────────────────────

const COVERAGE_RADIUS_MILES: f64 = 0.5;
const DRIVING_SPEED_MPH:     f64 = 20.0;
const SITE_RADIUS_M:         f64 = 250.0;
const SEARCH_BUDGET:         Duration = Duration::from_secs(5);

const EXISTING_SITE: &str = "Market Square";
const CANDIDATE_ADDRESSES: [&str; 3] = ["Parker's Piece", "Christ's Pieces", "Jesus Green"];

fn geocoder() -> StaticGeocoder {
    StaticGeocoder::new()
        .with("Market Square",   GeoPoint::new(52.2005, 0.1170))
        .with("Parker's Piece",  GeoPoint::new(52.1990, 0.1230))
        .with("Christ's Pieces", GeoPoint::new(52.2040, 0.1200))
        .with("Jesus Green",     GeoPoint::new(52.2095, 0.1190))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    println!("=== cambridge — coverage & site suitability ===");
    println!();

    // 1. Road network (second call is served from the handle's cache).
    let mut handle = RoadNetworkHandle::new();
    let network = handle.get_or_build(REGION, &build_network)?;
    let again = handle.get_or_build(REGION, &build_network)?;
    println!(
        "Road network: {} nodes, {} edges (built {}×, cache hit: {})",
        network.node_count(),
        network.edge_count(),
        handle.build_count(),
        Arc::ptr_eq(&network, &again)
    );

    // 2. Demand units.
    let units = demand_source()?.for_region(REGION)?;
    println!("Demand units: {}", units.len());
    println!();

    let geocoder = geocoder();

    // 3. Coverage around the existing site.
    let origin = locate(&geocoder, EXISTING_SITE)?;
    let t0 = Instant::now();
    let coverage = compute_coverage(
        &network,
        &units,
        origin,
        miles_to_metres(COVERAGE_RADIUS_MILES),
        Speed::from_mph(DRIVING_SPEED_MPH),
        Deadline::after(SEARCH_BUDGET),
    )?;
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "coverage done");

    println!("Coverage from {EXISTING_SITE} ({COVERAGE_RADIUS_MILES} mi @ {DRIVING_SPEED_MPH} mph)");
    match coverage.result.avg_travel_time_minutes.minutes() {
        Some(m) => println!("  average travel time : {m} min"),
        None => println!("  average travel time : n/a"),
    }
    println!("  population covered  : {}", coverage.result.population_covered);
    for d in &coverage.diagnostics {
        println!("  note: {d}");
    }
    println!();

    // 4. Candidate sites.
    let candidates = candidates_from_addresses(&geocoder, &CANDIDATE_ADDRESSES)?;
    let options = SiteOptions { collect_routes: true, deadline: Deadline::after(SEARCH_BUDGET) };
    let t0 = Instant::now();
    let sites = compute_site_scores(
        &network,
        &units,
        &candidates,
        SITE_RADIUS_M,
        &ScoringConfig::default(),
        options,
    )?;
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, sites = sites.len(), "site scoring done");

    println!(
        "{:<8} {:<16} {:>9} {:>8} {:>7} {:>9}",
        "Site", "Address", "Score", "Samples", "Routes", "Walk min"
    );
    println!("{}", "-".repeat(62));
    for site in &sites.sites {
        let walk = TravelTimes::from_metres(origin.distance_m(site.position));
        println!(
            "{:<8} {:<16} {:>9.1} {:>8} {:>7} {:>9.1}",
            site.name,
            site.address.as_deref().unwrap_or("-"),
            site.score.value,
            site.score.samples_scored,
            site.routes.len(),
            walk.walking_minutes,
        );
    }
    if let Some(best) = sites.best() {
        println!();
        println!("Best candidate: {} ({})", best.name, best.address.as_deref().unwrap_or("-"));
    }

    Ok(())
}
