//! Unit and end-to-end tests for sc-score.

#[cfg(test)]
pub(crate) mod helpers {
    use sc_core::{GeoPoint, NodeId};
    use sc_demand::{DemandSample, DemandUnit, Geometry, Population, ResolvedUnit};
    use sc_spatial::{RoadNetwork, RoadNetworkBuilder};

    /// Axis-aligned lat/lon box as a closed ring.
    pub fn square(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(lat_min, lon_min),
            GeoPoint::new(lat_min, lon_max),
            GeoPoint::new(lat_max, lon_max),
            GeoPoint::new(lat_max, lon_min),
            GeoPoint::new(lat_min, lon_min),
        ]
    }

    /// Square unit of half-width `h` degrees centred on `p`.
    pub fn unit_around(code: &str, population: Population, p: GeoPoint, h: f64) -> DemandUnit {
        let ring = square(p.lat - h, p.lat + h, p.lon - h, p.lon + h);
        DemandUnit::new(code, population, Geometry::from_ring(&ring)).unwrap()
    }

    /// A –1000 m– B –2000 m– C on one parallel, plus D with no roads.
    pub fn path_network() -> (RoadNetwork, [NodeId; 4]) {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(1, pos_a()).unwrap();
        let bb = b.add_node(2, pos_b()).unwrap();
        let c = b.add_node(3, pos_c()).unwrap();
        let d = b.add_node(4, pos_d()).unwrap();
        b.add_road(a, bb, 1_000.0).unwrap();
        b.add_road(bb, c, 2_000.0).unwrap();
        (b.build(), [a, bb, c, d])
    }

    pub fn pos_a() -> GeoPoint { GeoPoint::new(52.0, 0.00) }
    pub fn pos_b() -> GeoPoint { GeoPoint::new(52.0, 0.01) }
    pub fn pos_c() -> GeoPoint { GeoPoint::new(52.0, 0.03) }
    pub fn pos_d() -> GeoPoint { GeoPoint::new(52.0, -0.01) }

    /// Population 50 centred on B, 100 centred on C.
    pub fn path_units() -> Vec<DemandUnit> {
        vec![
            unit_around("U-B", Population::Known(50), pos_b(), 0.002),
            unit_around("U-C", Population::Known(100), pos_c(), 0.002),
        ]
    }

    pub const LAT0: f64 = 52.200;
    pub const LON0: f64 = 0.100;
    pub const STEP: f64 = 0.001;

    pub fn grid_pos(i: usize, j: usize) -> GeoPoint {
        GeoPoint::new(LAT0 + i as f64 * STEP, LON0 + j as f64 * STEP)
    }

    pub fn grid_node(i: usize, j: usize) -> NodeId {
        NodeId((i * 5 + j) as u32)
    }

    /// 5 × 5 grid, roads between orthogonal neighbours.
    pub fn grid_network() -> RoadNetwork {
        let mut b = RoadNetworkBuilder::new();
        for i in 0..5 {
            for j in 0..5 {
                b.add_node(1_000 + (i * 5 + j) as u64, grid_pos(i, j)).unwrap();
            }
        }
        for i in 0..5 {
            for j in 0..5 {
                if j + 1 < 5 {
                    let len = grid_pos(i, j).distance_m(grid_pos(i, j + 1));
                    b.add_road(grid_node(i, j), grid_node(i, j + 1), len).unwrap();
                }
                if i + 1 < 5 {
                    let len = grid_pos(i, j).distance_m(grid_pos(i + 1, j));
                    b.add_road(grid_node(i, j), grid_node(i + 1, j), len).unwrap();
                }
            }
        }
        b.build()
    }

    /// U-A rows 0–1 × cols 0–1 (100), U-B rows 0–1 × cols 2–4 (300),
    /// U-N rows 2–4 (unknown).
    pub fn grid_units() -> Vec<DemandUnit> {
        let h = STEP / 2.0;
        let ring = |lat0: f64, lat1: f64, lon0: f64, lon1: f64| {
            Geometry::from_ring(&square(LAT0 + lat0, LAT0 + lat1, LON0 + lon0, LON0 + lon1))
        };
        vec![
            DemandUnit::new("U-A", Population::Known(100), ring(-h, STEP + h, -h, STEP + h)).unwrap(),
            DemandUnit::new("U-B", Population::Known(300), ring(-h, STEP + h, STEP + h, 4.0 * STEP + h))
                .unwrap(),
            DemandUnit::new("U-N", Population::Unknown, ring(STEP + h, 4.0 * STEP + h, -h, 4.0 * STEP + h))
                .unwrap(),
        ]
    }

    pub fn resolved(code: &str, population: Population, node: u32) -> ResolvedUnit {
        ResolvedUnit {
            code: code.to_owned(),
            population,
            centroid: GeoPoint::new(0.0, 0.0),
            node: NodeId(node),
            geodesic_m: 0.0,
            in_radius: true,
        }
    }

    pub fn sample(code: &str, population: Population, node: u32) -> DemandSample {
        DemandSample { unit_code: code.to_owned(), node: NodeId(node), population }
    }
}

// ── CoverageScorer ────────────────────────────────────────────────────────────

#[cfg(test)]
mod coverage_scorer {
    use sc_core::{Diagnostic, NodeId, Speed};
    use sc_demand::Population;
    use sc_spatial::PathDistance;

    use super::helpers::resolved;
    use crate::{Average, CoverageScorer};

    #[test]
    fn rounds_half_away_from_zero() {
        // 1 m/s: 90 m = 1.5 min, 150 m = 2.5 min.
        let s = CoverageScorer::new(Speed::from_mps(1.0)).unwrap();
        let u = [resolved("U1", Population::Known(1), 1)];
        let (r, _) = s.score(NodeId(0), &u, &[PathDistance::Finite(90.0)]).unwrap();
        assert_eq!(r.avg_travel_time_minutes, Average::Defined(2));
        let (r, _) = s.score(NodeId(0), &u, &[PathDistance::Finite(150.0)]).unwrap();
        assert_eq!(r.avg_travel_time_minutes, Average::Defined(3));
        let (r, _) = s.score(NodeId(0), &u, &[PathDistance::Finite(89.0)]).unwrap();
        assert_eq!(r.avg_travel_time_minutes, Average::Defined(1));
    }

    #[test]
    fn unreachable_units_still_count_as_covered() {
        let s = CoverageScorer::new(Speed::from_mps(1.0)).unwrap();
        let u = [resolved("U1", Population::Known(10), 1), resolved("U2", Population::Known(20), 2)];
        let d = [PathDistance::Unreachable, PathDistance::Unreachable];
        let (r, diags) = s.score(NodeId(0), &u, &d).unwrap();
        assert_eq!(r.avg_travel_time_minutes, Average::Undefined);
        assert_eq!(r.population_covered, 30);
        assert_eq!(diags.len(), 2);
        assert_eq!(
            diags[0],
            Diagnostic::UnreachableDestination { from: NodeId(0), to: NodeId(1), unit: Some("U1".into()) }
        );
    }

    #[test]
    fn unknown_population_excluded_everywhere() {
        let s = CoverageScorer::new(Speed::from_mps(1.0)).unwrap();
        let u = [resolved("U1", Population::Unknown, 1), resolved("U2", Population::Known(4), 2)];
        let d = [PathDistance::Finite(6_000.0), PathDistance::Finite(600.0)];
        let (r, diags) = s.score(NodeId(0), &u, &d).unwrap();
        assert_eq!(r.avg_travel_time_minutes, Average::Defined(10));
        assert_eq!(r.population_covered, 4);
        assert_eq!(diags, vec![Diagnostic::UnknownPopulation { unit: "U1".into() }]);
    }

    #[test]
    fn zero_population_gives_undefined_average() {
        let s = CoverageScorer::new(Speed::from_mps(1.0)).unwrap();
        let u = [resolved("U1", Population::Known(0), 1)];
        let (r, _) = s.score(NodeId(0), &u, &[PathDistance::Finite(60.0)]).unwrap();
        assert_eq!(r.avg_travel_time_minutes, Average::Undefined);
        assert_eq!(r.population_covered, 0);
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let s = CoverageScorer::new(Speed::from_mps(1.0)).unwrap();
        let u = [resolved("U1", Population::Known(1), 1)];
        let err = s.score(NodeId(0), &u, &[]).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn non_positive_speed_rejected() {
        assert!(CoverageScorer::new(Speed::from_mps(0.0)).unwrap_err().is_invalid_input());
        assert!(CoverageScorer::new(Speed::from_kmh(-3.0)).unwrap_err().is_invalid_input());
    }
}

// ── compute_coverage ──────────────────────────────────────────────────────────

#[cfg(test)]
mod coverage {
    use sc_core::{Deadline, Diagnostic, Speed};
    use sc_demand::Population;
    use sc_spatial::{PathDistance, RoadNetwork, SpatialError};

    use super::helpers::{path_network, path_units, pos_a, pos_d, unit_around};
    use crate::{Average, ScoreError, compute_coverage};

    fn five_per_hour() -> Speed {
        Speed::metres_per_hour(5.0)
    }

    #[test]
    fn weighted_average_on_path_graph() {
        // t_B = 1000 m at 5 m/h = 12 000 min, t_C = 36 000 min.
        // (50·12 000 + 100·36 000) / 150 = 28 000.
        let (net, [a, b, c, _]) = path_network();
        let units = path_units();
        let rep = compute_coverage(&net, &units, pos_a(), 5_000.0, five_per_hour(), Deadline::none())
            .unwrap();

        assert_eq!(rep.origin_node, a);
        assert_eq!(rep.units.iter().map(|u| u.node).collect::<Vec<_>>(), vec![b, c]);
        assert_eq!(rep.distances, vec![PathDistance::Finite(1_000.0), PathDistance::Finite(3_000.0)]);
        assert_eq!(rep.result.avg_travel_time_minutes, Average::Defined(28_000));
        assert_eq!(rep.result.population_covered, 150);
        assert!(rep.diagnostics.is_empty());
    }

    #[test]
    fn unit_order_does_not_change_result() {
        let (net, _) = path_network();
        let mut units = path_units();
        let fwd = compute_coverage(&net, &units, pos_a(), 5_000.0, five_per_hour(), Deadline::none())
            .unwrap();
        units.reverse();
        let rev = compute_coverage(&net, &units, pos_a(), 5_000.0, five_per_hour(), Deadline::none())
            .unwrap();
        assert_eq!(fwd.result, rev.result);
    }

    #[test]
    fn all_unreachable_is_undefined_but_covered() {
        // D has no roads.
        let (net, [_, b, c, d]) = path_network();
        let units = path_units();
        let rep = compute_coverage(&net, &units, pos_d(), 5_000.0, five_per_hour(), Deadline::none())
            .unwrap();
        assert_eq!(rep.origin_node, d);
        assert_eq!(rep.result.avg_travel_time_minutes, Average::Undefined);
        assert_eq!(rep.result.population_covered, 150);
        assert_eq!(
            rep.diagnostics,
            vec![
                Diagnostic::UnreachableDestination { from: d, to: b, unit: Some("U-B".into()) },
                Diagnostic::UnreachableDestination { from: d, to: c, unit: Some("U-C".into()) },
            ]
        );
    }

    #[test]
    fn nothing_in_radius_is_undefined() {
        let (net, _) = path_network();
        let units = path_units();
        let rep = compute_coverage(&net, &units, pos_a(), 100.0, five_per_hour(), Deadline::none())
            .unwrap();
        assert!(rep.units.is_empty());
        assert_eq!(rep.result.avg_travel_time_minutes, Average::Undefined);
        assert_eq!(rep.result.population_covered, 0);
    }

    #[test]
    fn radius_excludes_far_unit() {
        // B's centroid is ~690 m from A, C's ~2 060 m.
        let (net, [_, b, _, _]) = path_network();
        let units = path_units();
        let rep = compute_coverage(&net, &units, pos_a(), 1_000.0, five_per_hour(), Deadline::none())
            .unwrap();
        assert_eq!(rep.units.len(), 1);
        assert_eq!(rep.units[0].node, b);
        assert_eq!(rep.result.avg_travel_time_minutes, Average::Defined(12_000));
        assert_eq!(rep.result.population_covered, 50);
    }

    #[test]
    fn unknown_population_unit_reported() {
        let (net, _) = path_network();
        let mut units = path_units();
        units.push(unit_around("U-A", Population::Unknown, pos_a(), 0.002));
        let rep = compute_coverage(&net, &units, pos_a(), 5_000.0, five_per_hour(), Deadline::none())
            .unwrap();
        assert_eq!(rep.result.avg_travel_time_minutes, Average::Defined(28_000));
        assert_eq!(rep.result.population_covered, 150);
        assert_eq!(rep.diagnostics, vec![Diagnostic::UnknownPopulation { unit: "U-A".into() }]);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let (net, _) = path_network();
        let units = path_units();
        let run = || {
            compute_coverage(&net, &units, pos_a(), 5_000.0, Speed::from_mph(20.0), Deadline::none())
                .unwrap()
        };
        let (x, y) = (run(), run());
        assert_eq!(x.result, y.result);
        assert_eq!(x.distances, y.distances);
    }

    #[test]
    fn invalid_inputs_rejected() {
        let (net, _) = path_network();
        let units = path_units();
        let err = compute_coverage(&net, &units, pos_a(), 0.0, five_per_hour(), Deadline::none())
            .unwrap_err();
        assert!(err.is_invalid_input());
        let err = compute_coverage(&net, &units, pos_a(), 1_000.0, Speed::from_mps(0.0), Deadline::none())
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn duplicate_unit_codes_rejected() {
        let (net, _) = path_network();
        let mut units = path_units();
        units.push(unit_around("U-B", Population::Known(10), pos_d(), 0.002));
        let err = compute_coverage(&net, &units, pos_a(), 5_000.0, five_per_hour(), Deadline::none())
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn empty_network_is_an_error() {
        let net = RoadNetwork::empty();
        let err = compute_coverage(&net, &path_units(), pos_a(), 1_000.0, five_per_hour(), Deadline::none())
            .unwrap_err();
        assert!(matches!(err, ScoreError::Spatial(SpatialError::EmptyNetwork)));
    }
}

// ── SuitabilityScorer ─────────────────────────────────────────────────────────

#[cfg(test)]
mod suitability {
    use sc_core::{DeductionMode, Diagnostic, NodeId, ScoringConfig};
    use sc_demand::{CandidateSamples, DemandSample, Population};
    use sc_spatial::PathDistance;

    use super::helpers::sample;
    use crate::SuitabilityScorer;

    fn samples(list: Vec<DemandSample>) -> CandidateSamples {
        CandidateSamples {
            candidate_node: NodeId(0),
            units: Vec::new(),
            samples: list,
            diagnostics: Vec::new(),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn default_mode_deducts_every_sample() {
        assert_eq!(ScoringConfig::default().deduction_mode, DeductionMode::AllSamples);
    }

    #[test]
    fn no_samples_scores_baseline_exactly() {
        let cfg = ScoringConfig::default();
        let (s, diags) = SuitabilityScorer::new(&cfg).unwrap().score(&samples(vec![]), &[]).unwrap();
        assert_eq!(s.value, 1_000.0);
        assert_eq!(s.samples_scored, 0);
        assert!(diags.is_empty());
    }

    #[test]
    fn sole_unit_has_zero_multiplier() {
        // One unit holds all sampled population: multiplier 0.
        let cfg = ScoringConfig::default();
        let smp = samples(vec![
            sample("U1", Population::Known(250), 1),
            sample("U1", Population::Known(250), 2),
        ]);
        let d = [PathDistance::Finite(4_000.0), PathDistance::Finite(9_000.0)];
        let (s, _) = SuitabilityScorer::new(&cfg).unwrap().score(&smp, &d).unwrap();
        assert_eq!(s.value, 1_000.0);
        assert_eq!(s.samples_scored, 2);
        assert_eq!(s.total_population, 250);
    }

    #[test]
    fn deductions_weighted_by_population_share() {
        // U1: 1 km → 13.33 min × 0.75 × 5 = 50
        // U2: 2 km → 26.67 min × 0.25 × 5 = 33.33
        let cfg = ScoringConfig::default();
        let smp = samples(vec![
            sample("U1", Population::Known(100), 1),
            sample("U2", Population::Known(300), 2),
        ]);
        let d = [PathDistance::Finite(1_000.0), PathDistance::Finite(2_000.0)];
        let scorer = SuitabilityScorer::new(&cfg).unwrap();

        let (all, _) = scorer.score(&smp, &d).unwrap();
        assert!(approx(all.value, 1_000.0 - 50.0 - 100.0 / 3.0), "got {}", all.value);
        assert_eq!(all.samples_scored, 2);

        let first_cfg = cfg.clone().with_deduction_mode(DeductionMode::FirstSampleOnly);
        let (first, _) = SuitabilityScorer::new(&first_cfg).unwrap().score(&smp, &d).unwrap();
        assert!(approx(first.value, 950.0), "got {}", first.value);
        assert_eq!(first.samples_scored, 1);
    }

    #[test]
    fn zero_total_population_uses_unit_multiplier() {
        // 900 m at 4.5 km/h = 12 min, × 1 × 5 = 60.
        let cfg = ScoringConfig::default();
        let smp = samples(vec![sample("U1", Population::Known(0), 1)]);
        let (s, _) = SuitabilityScorer::new(&cfg)
            .unwrap()
            .score(&smp, &[PathDistance::Finite(900.0)])
            .unwrap();
        assert!(approx(s.value, 940.0), "got {}", s.value);
    }

    #[test]
    fn unreachable_and_unknown_samples_skipped() {
        let cfg = ScoringConfig::default().with_deduction_mode(DeductionMode::FirstSampleOnly);
        let smp = samples(vec![
            sample("U0", Population::Unknown, 3),
            sample("U1", Population::Known(100), 1),
            sample("U2", Population::Known(300), 2),
        ]);
        let d = [
            PathDistance::Finite(50.0),
            PathDistance::Unreachable,
            PathDistance::Finite(2_000.0),
        ];
        let (s, diags) = SuitabilityScorer::new(&cfg).unwrap().score(&smp, &d).unwrap();
        // First scorable sample is U2.
        assert!(approx(s.value, 1_000.0 - 100.0 / 3.0), "got {}", s.value);
        assert_eq!(s.samples_scored, 1);
        assert_eq!(s.samples_total, 3);
        assert_eq!(
            diags,
            vec![Diagnostic::UnreachableDestination { from: NodeId(1), to: NodeId(0), unit: Some("U1".into()) }]
        );
    }

    #[test]
    fn inconsistent_unit_populations_cannot_raise_score() {
        // Same code, different populations: the total counts the code once.
        let cfg = ScoringConfig::default();
        let smp = samples(vec![
            sample("DUP", Population::Known(100), 1),
            sample("DUP", Population::Known(300), 2),
        ]);
        let d = [PathDistance::Finite(1_000.0), PathDistance::Finite(2_000.0)];
        let (s, _) = SuitabilityScorer::new(&cfg).unwrap().score(&smp, &d).unwrap();
        assert_eq!(s.total_population, 100);
        assert_eq!(s.value, 1_000.0);
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = ScoringConfig { walking_speed_kmh: 0.0, ..ScoringConfig::default() };
        assert!(SuitabilityScorer::new(&cfg).is_err());
        let cfg = ScoringConfig { circle_vertices: 2, ..ScoringConfig::default() };
        assert!(SuitabilityScorer::new(&cfg).is_err());
    }
}

// ── compute_site_scores ───────────────────────────────────────────────────────

#[cfg(test)]
mod sites {
    use sc_core::{Deadline, GeoPoint, ScoringConfig};
    use sc_demand::DemandUnit;
    use sc_spatial::ShortestPathEngine;

    use super::helpers::{grid_network, grid_node, grid_pos, grid_units};
    use crate::{Candidate, SiteOptions, SuitabilityScorer, compute_site_scores};

    #[test]
    fn unnamed_sites_get_ordinal_names() {
        let net = grid_network();
        let units = grid_units();
        let cands = [Candidate::new(grid_pos(0, 0)), Candidate::new(grid_pos(4, 4))];
        let out = compute_site_scores(&net, &units, &cands, 150.0, &ScoringConfig::default(), SiteOptions::default())
            .unwrap();
        let names: Vec<&str> = out.scores().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Site 1", "Site 2"]);
        assert!(out.get("Site 2").is_some());
        assert!(out.get("Site 3").is_none());
    }

    #[test]
    fn score_matches_network_distances() {
        let net = grid_network();
        let units = grid_units();
        let cfg = ScoringConfig::default();
        let cands = [Candidate::named("Corner", grid_pos(0, 0))];
        let out = compute_site_scores(&net, &units, &cands, 150.0, &cfg, SiteOptions::default()).unwrap();
        let site = out.get("Corner").unwrap();

        assert_eq!(site.node, grid_node(0, 0));
        assert_eq!(site.samples.samples.len(), 9);
        assert_eq!(site.score.samples_scored, 9);
        assert_eq!(site.score.total_population, 400);
        assert!(site.diagnostics.is_empty());
        assert!(site.routes.is_empty(), "routes only when requested");

        // Roads are two-way, so an outbound search gives the same distances.
        let targets = site.samples.nodes();
        let d = ShortestPathEngine::new(&net).run(site.node, &targets).unwrap().distances(&targets);
        let (expect, _) = SuitabilityScorer::new(&cfg).unwrap().score(&site.samples, &d).unwrap();
        assert!((site.score.value - expect.value).abs() < 1e-9);
        assert!(site.score.value < 1_000.0);
    }

    #[test]
    fn site_with_no_nearby_units_scores_baseline() {
        let net = grid_network();
        let units = grid_units();
        // ~11 km south of the grid: snaps to the corner but samples nothing.
        let cands = [Candidate::named("Far", GeoPoint::new(52.1, 0.1))];
        let out = compute_site_scores(&net, &units, &cands, 150.0, &ScoringConfig::default(), SiteOptions::default())
            .unwrap();
        assert_eq!(out.score_of("Far"), Some(1_000.0));
    }

    #[test]
    fn routes_run_from_sample_to_candidate() {
        let net = grid_network();
        let units = grid_units();
        let cands = [Candidate::new(grid_pos(0, 0))];
        let opts = SiteOptions { collect_routes: true, deadline: Deadline::none() };
        let out = compute_site_scores(&net, &units, &cands, 150.0, &ScoringConfig::default(), opts).unwrap();
        let site = &out.sites[0];
        assert_eq!(site.routes.len(), site.samples.samples.len());
        for (route, s) in site.routes.iter().zip(&site.samples.samples) {
            assert_eq!(route.first(), Some(s.node));
            assert_eq!(route.last(), Some(site.node));
            assert!(route.length_m > 0.0);
        }
    }

    #[test]
    fn unknown_population_diagnostic_carried_to_report() {
        let net = grid_network();
        let units = grid_units();
        let cands = [Candidate::new(grid_pos(0, 0))];
        let out = compute_site_scores(&net, &units, &cands, 300.0, &ScoringConfig::default(), SiteOptions::default())
            .unwrap();
        let site = &out.sites[0];
        assert_eq!(site.samples.units.len(), 3);
        assert_eq!(site.score.samples_scored, 9);
        assert_eq!(site.diagnostics.len(), 1);
    }

    #[test]
    fn best_prefers_higher_score() {
        let net = grid_network();
        let units = grid_units();
        let cands = [
            Candidate::named("Near", grid_pos(0, 0)),
            Candidate::named("Empty", GeoPoint::new(52.1, 0.1)),
        ];
        let out = compute_site_scores(&net, &units, &cands, 150.0, &ScoringConfig::default(), SiteOptions::default())
            .unwrap();
        assert_eq!(out.best().map(|s| s.name.as_str()), Some("Empty"));
    }

    #[test]
    fn bad_batches_rejected() {
        let net = grid_network();
        let units = grid_units();
        let cfg = ScoringConfig::default();

        let err = compute_site_scores(&net, &units, &[], 150.0, &cfg, SiteOptions::default()).unwrap_err();
        assert!(err.is_invalid_input());

        let dup = [Candidate::named("X", grid_pos(0, 0)), Candidate::named("X", grid_pos(1, 1))];
        let err = compute_site_scores(&net, &units, &dup, 150.0, &cfg, SiteOptions::default()).unwrap_err();
        assert!(err.is_invalid_input());

        let one = [Candidate::new(grid_pos(0, 0))];
        let err = compute_site_scores(&net, &units, &one, -1.0, &cfg, SiteOptions::default()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn duplicate_unit_codes_rejected() {
        let net = grid_network();
        let units: Vec<DemandUnit> = grid_units()
            .into_iter()
            .take(2)
            .map(|mut u| {
                u.code = "DUP".into();
                u
            })
            .collect();
        let cands = [Candidate::new(grid_pos(4, 4))];
        let err = compute_site_scores(&net, &units, &cands, 300.0, &ScoringConfig::default(), SiteOptions::default())
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn deterministic_across_runs() {
        let net = grid_network();
        let units = grid_units();
        let cands: Vec<Candidate> = (0..5).map(|i| Candidate::new(grid_pos(i, i))).collect();
        let run = || {
            compute_site_scores(&net, &units, &cands, 200.0, &ScoringConfig::default(), SiteOptions::default())
                .unwrap()
                .scores()
                .into_iter()
                .map(|(n, v)| (n.to_owned(), v.to_bits()))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}

// ── Geocoding ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod geocode {
    use sc_core::GeoPoint;

    use crate::{ScoreError, StaticGeocoder, candidates_from_addresses, locate};

    fn table() -> StaticGeocoder {
        StaticGeocoder::new()
            .with("1 Market Square, Cambridge", GeoPoint::new(52.2055, 0.1190))
            .with("Station Road", GeoPoint::new(52.1940, 0.1370))
    }

    #[test]
    fn lookup_ignores_case_and_spacing() {
        let g = table();
        let p = locate(&g, "  1 market   square, CAMBRIDGE ").unwrap();
        assert_eq!(p, GeoPoint::new(52.2055, 0.1190));
    }

    #[test]
    fn blank_address_is_invalid_input() {
        let err = locate(&table(), "   ").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn unknown_address_is_geocode_error() {
        let err = locate(&table(), "Nowhere Lane").unwrap_err();
        assert!(matches!(err, ScoreError::Geocode(ref a) if a == "Nowhere Lane"));
    }

    #[test]
    fn closures_are_geocoders() {
        let g = |a: &str| (a == "here").then(|| GeoPoint::new(1.0, 2.0));
        assert_eq!(locate(&g, "here").unwrap(), GeoPoint::new(1.0, 2.0));
        assert!(locate(&g, "there").is_err());
    }

    #[test]
    fn batch_keeps_addresses() {
        let c = candidates_from_addresses(&table(), &["Station Road", "1 Market Square, Cambridge"]).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c[0].address.as_deref(), Some("Station Road"));
        assert!(c[0].name.is_none());
        assert!(candidates_from_addresses(&table(), &["Station Road", "?"]).is_err());
    }
}

// ── Travel times ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod travel {
    use sc_core::METRES_PER_MILE;

    use crate::TravelTimes;

    #[test]
    fn minutes_per_mode() {
        let t = TravelTimes::from_miles(1.5);
        assert!((t.walking_minutes - 30.0).abs() < 1e-9);
        assert!((t.peak_driving_minutes - 6.0).abs() < 1e-9);
        assert!((t.off_peak_driving_minutes - 3.6).abs() < 1e-9);
    }

    #[test]
    fn distance_rounded_to_hundredths() {
        assert_eq!(TravelTimes::from_miles(1.234).miles, 1.23);
        assert_eq!(TravelTimes::from_miles(1.236).miles, 1.24);
        let t = TravelTimes::from_metres(2.0 * METRES_PER_MILE);
        assert_eq!(t.miles, 2.0);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use sc_core::{DeductionMode, NodeId, ScoringConfig, Speed};
    use sc_demand::{CandidateSamples, Population};
    use sc_spatial::PathDistance;

    use super::helpers::{resolved, sample};
    use crate::{CoverageScorer, SuitabilityScorer};

    proptest! {
        #[test]
        fn coverage_is_order_invariant(
            items in prop::collection::vec((0u64..10_000, 0.0f64..100_000.0, any::<bool>()), 1..20),
            rot in 0usize..20,
        ) {
            let units: Vec<_> = items
                .iter()
                .enumerate()
                .map(|(i, &(pop, _, _))| resolved(&format!("U{i:02}"), Population::Known(pop), i as u32))
                .collect();
            let dists: Vec<_> = items
                .iter()
                .map(|&(_, d, ok)| if ok { PathDistance::Finite(d) } else { PathDistance::Unreachable })
                .collect();

            let scorer = CoverageScorer::new(Speed::from_mph(20.0)).unwrap();
            let (base, _) = scorer.score(NodeId(0), &units, &dists).unwrap();

            let k = rot % units.len();
            let mut u2 = units.clone();
            let mut d2 = dists.clone();
            u2.rotate_left(k);
            d2.rotate_left(k);
            u2.reverse();
            d2.reverse();
            let (other, _) = scorer.score(NodeId(0), &u2, &d2).unwrap();

            prop_assert_eq!(base, other);
            prop_assert_eq!(base.population_covered, items.iter().map(|i| i.0).sum::<u64>());
        }
    }

    proptest! {
        #[test]
        fn site_score_never_exceeds_baseline(
            units in prop::collection::vec(
                (0u64..10_000, prop::collection::vec((0.0f64..50_000.0, any::<bool>()), 1..4)),
                0..8,
            ),
            first_only in any::<bool>(),
        ) {
            let mut samples = CandidateSamples { candidate_node: NodeId(0), ..CandidateSamples::default() };
            let mut dists = Vec::new();
            let mut node = 1u32;
            for (i, (pop, nodes)) in units.iter().enumerate() {
                let code = format!("U{i}");
                samples.units.push(code.clone());
                for &(d, ok) in nodes {
                    samples.samples.push(sample(&code, Population::Known(*pop), node));
                    dists.push(if ok { PathDistance::Finite(d) } else { PathDistance::Unreachable });
                    node += 1;
                }
            }

            let mode = if first_only { DeductionMode::FirstSampleOnly } else { DeductionMode::AllSamples };
            let cfg = ScoringConfig::default().with_deduction_mode(mode);
            let (score, _) = SuitabilityScorer::new(&cfg).unwrap().score(&samples, &dists).unwrap();
            prop_assert!(score.value <= cfg.baseline, "score {} above baseline", score.value);
        }
    }
}
