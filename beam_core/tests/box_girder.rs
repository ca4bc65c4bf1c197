//! End-to-end tests for a matboard box girder.
//!
//! Runs the complete pipeline through the public API:
//! 1. Build and finalize the cross-section
//! 2. Solve internal forces (stationary diagram or moving-load envelope)
//! 3. Evaluate every failure mode
//! 4. Check the results against statics and against each other

use approx::assert_relative_eq;
use beam_core::calculations::internal_forces::{solve_envelope, solve_stationary};
use beam_core::calculations::{calculate, AnalysisInput, FailureMode, InternalForces, PlateCheck, PlateSupport};
use beam_core::loads::{AxlePattern, DistributedLoad, LoadCase, PointLoad, StationaryLoads, SweepDirection};
use beam_core::materials::MaterialLimits;
use beam_core::section::{CrossSectionBuilder, GlueJoint, Segment, SegmentId};
use beam_core::settings::AnalysisSettings;

const SPAN: f64 = 1200.0;
const T: f64 = 1.27;

/// 100 mm deck on two 5 mm glue tabs, two webs, 80 mm bottom flange
fn box_section() -> CrossSectionBuilder {
    CrossSectionBuilder::new()
        .with_segment(Segment::new(1, 100.0, T, 75.0))
        .with_segment(Segment::new(2, 5.0, T, 75.0 - T))
        .with_segment(Segment::new(3, 5.0, T, 75.0 - T))
        .with_segment(Segment::new(4, T, 75.0 - 2.0 * T, T))
        .with_segment(Segment::new(5, T, 75.0 - 2.0 * T, T))
        .with_segment(Segment::new(6, 80.0, T, 0.0))
        .with_glue_joint(GlueJoint::new(2, 1, 5.0))
        .with_glue_joint(GlueJoint::new(3, 1, 5.0))
        .with_glue_joint(GlueJoint::new(6, 4, T))
        .with_glue_joint(GlueJoint::new(6, 5, T))
}

fn box_plates() -> Vec<PlateCheck> {
    vec![
        PlateCheck::new(1, PlateSupport::BothEdgesRestrained).with_unsupported_width(80.0 - 2.0 * T),
        PlateCheck::new(1, PlateSupport::OneEdgeFree).with_unsupported_width(10.0),
        PlateCheck::new(4, PlateSupport::WebFlexure),
        PlateCheck::new(4, PlateSupport::WebShear).with_diaphragm_spacing(400.0),
    ]
}

fn input(load_case: LoadCase, step_mm: f64) -> AnalysisInput {
    AnalysisInput {
        label: "Box girder".to_string(),
        span_mm: SPAN,
        section: box_section(),
        load_case,
        material: MaterialLimits::matboard(),
        plates: box_plates(),
        settings: AnalysisSettings {
            step_mm,
            sweep_step_mm: step_mm,
            ..AnalysisSettings::default()
        },
    }
}

#[test]
fn section_properties_are_consistent() {
    let section = box_section().finalize().unwrap();
    let props = section.properties();

    let area: f64 = section.segments().iter().map(Segment::area).sum();
    assert_relative_eq!(props.total_area_mm2, area, max_relative = 1e-12);
    assert!(props.centroid_mm > 0.0 && props.centroid_mm < props.top_mm);

    // Two glue levels: deck/tabs and bottom flange/webs
    assert_eq!(props.glue_levels.len(), 2);
    assert_relative_eq!(props.glue_thickness_at(75.0), 10.0, max_relative = 1e-12);
    assert_relative_eq!(props.glue_thickness_at(T), 2.0 * T, max_relative = 1e-12);

    // Both webs cross the centroid
    assert_relative_eq!(props.width_at(props.centroid_mm), 2.0 * T, max_relative = 1e-12);

    // Q is largest at the neutral axis
    let q_na = section.first_moment_above(props.centroid_mm);
    for h in [5.0, 20.0, 60.0, 74.0] {
        assert!(section.first_moment_above(h) <= q_na + 1e-9);
    }
}

#[test]
fn rigid_shift_moves_centroid_only() {
    let section = box_section().finalize().unwrap();
    let shifted = section.shifted(25.0).unwrap();
    assert_relative_eq!(
        shifted.properties().centroid_mm,
        section.properties().centroid_mm + 25.0,
        max_relative = 1e-12
    );
    assert_relative_eq!(
        shifted.properties().moment_of_inertia_mm4,
        section.properties().moment_of_inertia_mm4,
        max_relative = 1e-9
    );
}

#[test]
fn stationary_case_end_to_end() {
    let loads = StationaryLoads::new()
        .with_point_load(PointLoad::new(550.0, 200.0))
        .with_point_load(PointLoad::new(1060.0, 200.0))
        .with_distributed_load(DistributedLoad::partial(0.05, 100.0, 900.0));
    let result = calculate(&input(LoadCase::Stationary(loads), 1.0)).unwrap();

    // Reactions balance the applied load
    let reactions = result.reactions.unwrap();
    assert_relative_eq!(reactions.total_n(), 440.0, max_relative = 1e-12);
    assert_relative_eq!(result.applied_load_n, 440.0, max_relative = 1e-12);

    // Moment closes at both supports
    let InternalForces::Profile(profile) = &result.forces else {
        panic!("stationary loads must give a profile");
    };
    assert_eq!(profile.samples.len(), 1201);
    assert_eq!(profile.samples[0].moment_nmm, 0.0);
    assert!(profile.samples[1200].moment_nmm.abs() < 1e-6);

    // Every mode is reported; governing is the minimum
    assert_eq!(result.fos.modes.len(), 3 + 2 + 4);
    let min = result.fos.modes.iter().map(|m| m.fos).fold(f64::INFINITY, f64::min);
    assert_eq!(result.governing_fos(), min);
    assert_relative_eq!(result.failure_load_n(), 440.0 * min, max_relative = 1e-12);

    // Sagging only: the bottom flange never buckles, the deck does
    let deck = result
        .fos
        .mode(&FailureMode::PlateBucklingFlange { segment: SegmentId(1) })
        .unwrap();
    assert!(deck.fos.is_finite());
}

#[test]
fn moving_train_end_to_end() {
    let train = AxlePattern::six_wheel_train(400.0);
    let result = calculate(&input(LoadCase::Moving(train.clone()), 5.0)).unwrap();
    assert!(result.reactions.is_none());
    assert_relative_eq!(result.applied_load_n, 400.0, max_relative = 1e-12);

    let InternalForces::Envelope(envelope) = &result.forces else {
        panic!("moving loads must give an envelope");
    };

    // The envelope bounds the diagram of any single train position
    for lead in [300.0, 600.0, 1000.0, 1500.0] {
        let placed = train.place(lead, SPAN, SweepDirection::LeftToRight);
        let profile = solve_stationary(&placed, SPAN, 5.0).unwrap();
        for (env, s) in envelope.samples.iter().zip(&profile.samples) {
            assert!(env.max_moment_nmm >= s.moment_nmm - 1e-9);
            assert!(env.min_moment_nmm <= s.moment_nmm + 1e-9);
            assert!(env.max_shear_n >= s.shear_n - 1e-9);
            assert!(env.min_shear_n <= s.shear_n + 1e-9);
        }
    }

    // Peak shear never exceeds the train weight, and the peak moment is
    // bounded by the whole train sitting at midspan: P L / 4
    assert!(result.peak_shear_n <= 400.0 + 1e-9);
    assert!(result.peak_moment_nmm <= 400.0 * SPAN / 4.0);
    assert!(result.peak_moment_nmm > 0.0);

    assert!(result.governing_fos().is_finite());
    assert_relative_eq!(result.failure_load_n(), 400.0 * result.governing_fos(), max_relative = 1e-12);

    let json = serde_json::to_string_pretty(&result).unwrap();
    assert!(json.contains("\"kind\": \"Envelope\""));
}

#[test]
fn sweep_direction_mirrors_envelope() {
    let train = AxlePattern::six_wheel_train(400.0);
    let forward = solve_envelope(&train, SPAN, 10.0, 10.0, SweepDirection::LeftToRight).unwrap();
    let backward = solve_envelope(&train, SPAN, 10.0, 10.0, SweepDirection::RightToLeft).unwrap();

    let n = forward.samples.len();
    for i in 0..n {
        let f = forward.samples[i];
        let b = backward.samples[n - 1 - i];
        assert!((f.max_moment_nmm - b.max_moment_nmm).abs() < 1e-6);
    }
}

#[test]
fn input_round_trips_through_json() {
    let original = input(LoadCase::Moving(AxlePattern::six_wheel_train(400.0)), 2.0);
    let json = serde_json::to_string(&original).unwrap();
    let parsed: AnalysisInput = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, original);
}
