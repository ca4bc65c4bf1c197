//! Shear-force and bending-moment diagrams.
//!
//! The span is sampled at a fixed step. Shear comes straight from statics;
//! moment is the running integral of shear from M(0) = 0. Each interval
//! between samples is split at every load discontinuity and each linear piece
//! is integrated with the trapezoid rule, which is exact for the piecewise
//! linear shear produced by point and uniform loads.
//!
//! For a moving [`AxlePattern`], the stationary diagram is computed at every
//! leading-axle position of the sweep and folded into an [`Envelope`].
//!
//! ## Example
//!
//! ```rust
//! use beam_core::calculations::internal_forces::solve_stationary;
//! use beam_core::loads::{PointLoad, StationaryLoads};
//!
//! let loads = StationaryLoads::new().with_point_load(PointLoad::new(600.0, 1000.0));
//! let profile = solve_stationary(&loads, 1200.0, 1.0).unwrap();
//!
//! let peak = profile.max_moment();
//! assert!((peak.moment_nmm - 300_000.0).abs() < 1e-6);
//! assert!((peak.position_mm - 600.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_finite, CalcError, CalcResult};
use crate::loads::{validate_span, AxlePattern, LoadCase, Reactions, Side, StationaryLoads, SweepDirection};
use crate::settings::{validate_step, validate_steps, AnalysisSettings};

/// Shear and moment at one span position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceSample {
    pub position_mm: f64,
    /// Shear just right of the position (N)
    pub shear_n: f64,
    /// Bending moment (N·mm), positive sagging
    pub moment_nmm: f64,
}

/// SFD/BMD for a fixed set of loads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalForceProfile {
    pub span_mm: f64,
    pub step_mm: f64,
    pub reactions: Reactions,
    pub samples: Vec<ForceSample>,
}

impl InternalForceProfile {
    /// Sample with the largest moment (first one on ties)
    pub fn max_moment(&self) -> ForceSample {
        first_extreme(&self.samples, |s| s.moment_nmm)
    }

    /// Sample with the most negative moment (first one on ties)
    pub fn min_moment(&self) -> ForceSample {
        first_extreme(&self.samples, |s| -s.moment_nmm)
    }

    /// Sample with the largest shear magnitude (first one on ties)
    pub fn max_abs_shear(&self) -> ForceSample {
        first_extreme(&self.samples, |s| s.shear_n.abs())
    }
}

fn first_extreme(samples: &[ForceSample], key: impl Fn(&ForceSample) -> f64) -> ForceSample {
    let mut best = samples[0];
    for sample in &samples[1..] {
        if key(sample) > key(&best) {
            best = *sample;
        }
    }
    best
}

/// Worst internal forces at one span position across the whole sweep.
///
/// Each extreme records the leading-axle position that first produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeSample {
    pub position_mm: f64,
    pub max_shear_n: f64,
    pub min_shear_n: f64,
    pub max_moment_nmm: f64,
    pub min_moment_nmm: f64,
    pub max_shear_lead_mm: f64,
    pub min_shear_lead_mm: f64,
    pub max_moment_lead_mm: f64,
    pub min_moment_lead_mm: f64,
}

impl EnvelopeSample {
    fn seed(position_mm: f64) -> Self {
        EnvelopeSample {
            position_mm,
            max_shear_n: f64::NEG_INFINITY,
            min_shear_n: f64::INFINITY,
            max_moment_nmm: f64::NEG_INFINITY,
            min_moment_nmm: f64::INFINITY,
            max_shear_lead_mm: f64::NAN,
            min_shear_lead_mm: f64::NAN,
            max_moment_lead_mm: f64::NAN,
            min_moment_lead_mm: f64::NAN,
        }
    }

    /// Strict comparisons keep the first sweep position on ties.
    fn absorb(mut self, sample: &ForceSample, lead_mm: f64) -> Self {
        if sample.shear_n > self.max_shear_n {
            self.max_shear_n = sample.shear_n;
            self.max_shear_lead_mm = lead_mm;
        }
        if sample.shear_n < self.min_shear_n {
            self.min_shear_n = sample.shear_n;
            self.min_shear_lead_mm = lead_mm;
        }
        if sample.moment_nmm > self.max_moment_nmm {
            self.max_moment_nmm = sample.moment_nmm;
            self.max_moment_lead_mm = lead_mm;
        }
        if sample.moment_nmm < self.min_moment_nmm {
            self.min_moment_nmm = sample.moment_nmm;
            self.min_moment_lead_mm = lead_mm;
        }
        self
    }
}

/// Peak internal forces anywhere on the span for one sweep position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicPoint {
    pub lead_mm: f64,
    /// Signed shear with the largest magnitude (N)
    pub peak_shear_n: f64,
    /// Signed moment with the largest magnitude (N·mm)
    pub peak_moment_nmm: f64,
}

/// SFD/BMD envelope of a moving load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub span_mm: f64,
    pub step_mm: f64,
    pub sweep_step_mm: f64,
    pub direction: SweepDirection,
    pub samples: Vec<EnvelopeSample>,
    /// Loading characteristic, one point per sweep position in sweep order
    pub characteristic: Vec<CharacteristicPoint>,
}

impl Envelope {
    fn seed(span_mm: f64, step_mm: f64, sweep_step_mm: f64, direction: SweepDirection, positions: &[f64]) -> Self {
        Envelope {
            span_mm,
            step_mm,
            sweep_step_mm,
            direction,
            samples: positions.iter().map(|&x| EnvelopeSample::seed(x)).collect(),
            characteristic: Vec::new(),
        }
    }

    /// Fold one sweep step into the envelope
    fn absorb(mut self, profile: &InternalForceProfile, lead_mm: f64) -> Self {
        self.samples = self
            .samples
            .iter()
            .zip(&profile.samples)
            .map(|(env, sample)| env.absorb(sample, lead_mm))
            .collect();

        let shear = profile.max_abs_shear().shear_n;
        let moment = first_extreme(&profile.samples, |s| s.moment_nmm.abs()).moment_nmm;
        self.characteristic.push(CharacteristicPoint {
            lead_mm,
            peak_shear_n: shear,
            peak_moment_nmm: moment,
        });
        self
    }

    /// Sweep position producing the largest shear magnitude anywhere
    pub fn critical_shear_position(&self) -> CharacteristicPoint {
        self.critical_by(|c| c.peak_shear_n.abs())
    }

    /// Sweep position producing the largest moment magnitude anywhere
    pub fn critical_moment_position(&self) -> CharacteristicPoint {
        self.critical_by(|c| c.peak_moment_nmm.abs())
    }

    fn critical_by(&self, key: impl Fn(&CharacteristicPoint) -> f64) -> CharacteristicPoint {
        let mut best = self.characteristic[0];
        for point in &self.characteristic[1..] {
            if key(point) > key(&best) {
                best = *point;
            }
        }
        best
    }

    /// Envelope sample with the largest positive moment
    pub fn max_moment(&self) -> EnvelopeSample {
        self.first_sample_by(|s| s.max_moment_nmm)
    }

    /// Envelope sample with the largest shear magnitude
    pub fn max_abs_shear(&self) -> EnvelopeSample {
        self.first_sample_by(|s| s.max_shear_n.abs().max(s.min_shear_n.abs()))
    }

    fn first_sample_by(&self, key: impl Fn(&EnvelopeSample) -> f64) -> EnvelopeSample {
        let mut best = self.samples[0];
        for sample in &self.samples[1..] {
            if key(sample) > key(&best) {
                best = *sample;
            }
        }
        best
    }
}

/// Shear and moment range at one position, the common input to stress checks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceRange {
    pub position_mm: f64,
    pub max_shear_n: f64,
    pub min_shear_n: f64,
    pub max_moment_nmm: f64,
    pub min_moment_nmm: f64,
}

impl ForceRange {
    /// Largest shear magnitude
    pub fn abs_shear_n(&self) -> f64 {
        self.max_shear_n.abs().max(self.min_shear_n.abs())
    }
}

/// Result of the internal-force stage: a single diagram or an envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum InternalForces {
    Profile(InternalForceProfile),
    Envelope(Envelope),
}

impl InternalForces {
    pub fn span_mm(&self) -> f64 {
        match self {
            InternalForces::Profile(p) => p.span_mm,
            InternalForces::Envelope(e) => e.span_mm,
        }
    }

    /// Per-position demand ranges; a single diagram has max = min.
    pub fn ranges(&self) -> Vec<ForceRange> {
        match self {
            InternalForces::Profile(profile) => profile
                .samples
                .iter()
                .map(|s| ForceRange {
                    position_mm: s.position_mm,
                    max_shear_n: s.shear_n,
                    min_shear_n: s.shear_n,
                    max_moment_nmm: s.moment_nmm,
                    min_moment_nmm: s.moment_nmm,
                })
                .collect(),
            InternalForces::Envelope(envelope) => envelope
                .samples
                .iter()
                .map(|s| ForceRange {
                    position_mm: s.position_mm,
                    max_shear_n: s.max_shear_n,
                    min_shear_n: s.min_shear_n,
                    max_moment_nmm: s.max_moment_nmm,
                    min_moment_nmm: s.min_moment_nmm,
                })
                .collect(),
        }
    }
}

/// Upper bound on sample intervals along the span
pub const MAX_INTERVALS: usize = 1_000_000;

/// Upper bound on leading-axle positions in one sweep
pub const MAX_SWEEP_POSITIONS: usize = 1_000_000;

/// N = ceil(L/step) + 1 positions from 0 to L, the last one clamped to L.
pub fn sample_positions(span_mm: f64, step_mm: f64) -> CalcResult<Vec<f64>> {
    grid_positions(span_mm, step_mm, "step_mm")
}

fn grid_positions(span_mm: f64, step_mm: f64, field: &str) -> CalcResult<Vec<f64>> {
    validate_span(span_mm)?;
    validate_step(field, step_mm)?;
    let ratio = span_mm / step_mm;
    if !(ratio <= MAX_INTERVALS as f64) {
        return Err(CalcError::invalid_load(
            field,
            step_mm.to_string(),
            format!("Step divides the span into more than {} intervals", MAX_INTERVALS),
        ));
    }
    // Relative guard against L/step landing a hair above an integer
    let intervals = (ratio - ratio * 1e-12).ceil().max(1.0) as usize;
    Ok((0..=intervals)
        .map(|i| if i == intervals { span_mm } else { (i as f64 * step_mm).min(span_mm) })
        .collect())
}

/// Sample positions merged with the finer sweep grid
fn sweep_stations(span_mm: f64, step_mm: f64, sweep_step_mm: f64) -> CalcResult<Vec<f64>> {
    let mut stations = sample_positions(span_mm, step_mm)?;
    stations.extend(grid_positions(span_mm, sweep_step_mm, "sweep_step_mm")?);
    stations.sort_by(|a, b| a.total_cmp(b));
    stations.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
    Ok(stations)
}

/// SFD/BMD for stationary loads
pub fn solve_stationary(loads: &StationaryLoads, span_mm: f64, step_mm: f64) -> CalcResult<InternalForceProfile> {
    loads.validate(span_mm)?;
    let positions = sample_positions(span_mm, step_mm)?;
    if loads.is_empty() {
        log::warn!("Stationary load case has no loads; diagrams will be zero");
    }

    let profile = integrate(loads, span_mm, step_mm, &positions);
    let last = profile.samples[profile.samples.len() - 1];
    ensure_finite("bending moment", last.moment_nmm)?;
    log::debug!(
        "Solved stationary SFD/BMD: {} samples, closing moment {:.3e} N*mm",
        profile.samples.len(),
        last.moment_nmm
    );
    Ok(profile)
}

/// Shear and running moment at `positions` for loads already validated.
fn integrate(loads: &StationaryLoads, span_mm: f64, step_mm: f64, positions: &[f64]) -> InternalForceProfile {
    let reactions = loads.reactions_unchecked(span_mm);
    let shear = |x: f64, side: Side| loads.shear_at(x, span_mm, reactions.left_n, side);

    let mut samples = Vec::with_capacity(positions.len());
    let mut moment = 0.0;
    samples.push(ForceSample {
        position_mm: positions[0],
        shear_n: shear(positions[0], Side::Right),
        moment_nmm: moment,
    });

    for pair in positions.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let mut knots = Vec::with_capacity(4);
        knots.push(a);
        knots.extend(loads.breakpoints_between(a, b, span_mm));
        knots.push(b);

        moment += knots
            .windows(2)
            .map(|piece| 0.5 * (shear(piece[0], Side::Right) + shear(piece[1], Side::Left)) * (piece[1] - piece[0]))
            .sum::<f64>();

        samples.push(ForceSample {
            position_mm: b,
            shear_n: shear(b, Side::Right),
            moment_nmm: moment,
        });
    }

    InternalForceProfile {
        span_mm,
        step_mm,
        reactions,
        samples,
    }
}

/// SFD/BMD envelope for a moving axle pattern.
///
/// The sweep stands every axle on every sample position (and on every point
/// of the finer sweep grid), so the moment envelope is exact at the samples
/// in either direction. The diagram at each lead position is folded into the
/// running envelope.
pub fn solve_envelope(
    pattern: &AxlePattern,
    span_mm: f64,
    step_mm: f64,
    sweep_step_mm: f64,
    direction: SweepDirection,
) -> CalcResult<Envelope> {
    pattern.validate()?;
    validate_steps(step_mm, sweep_step_mm)?;
    let positions = sample_positions(span_mm, step_mm)?;
    let stations = sweep_stations(span_mm, step_mm, sweep_step_mm)?;
    if pattern.axle_count().saturating_mul(stations.len()) > MAX_SWEEP_POSITIONS {
        return Err(CalcError::invalid_load(
            "sweep_step_mm",
            sweep_step_mm.to_string(),
            format!(
                "{} axles over {} stations exceeds {} sweep positions",
                pattern.axle_count(),
                stations.len(),
                MAX_SWEEP_POSITIONS
            ),
        ));
    }

    let sweep = pattern.sweep_positions(&stations, direction);
    let seed = Envelope::seed(span_mm, step_mm, sweep_step_mm, direction, &positions);
    let envelope = sweep.iter().fold(seed, |envelope, &lead| {
        let placed = pattern.place(lead, span_mm, direction);
        envelope.absorb(&integrate(&placed, span_mm, step_mm, &positions), lead)
    });

    let peak = envelope.max_moment();
    ensure_finite("moment envelope", peak.max_moment_nmm)?;
    log::debug!(
        "Swept {} axles over {} positions ({}): peak moment {:.1} N*mm at x = {:.1} mm",
        pattern.axle_count(),
        sweep.len(),
        direction.display_name(),
        peak.max_moment_nmm,
        peak.position_mm
    );
    Ok(envelope)
}

/// Internal forces for any load case using the configured discretization
pub fn solve(load_case: &LoadCase, span_mm: f64, settings: &AnalysisSettings) -> CalcResult<InternalForces> {
    settings.validate()?;
    match load_case {
        LoadCase::Stationary(loads) => solve_stationary(loads, span_mm, settings.step_mm).map(InternalForces::Profile),
        LoadCase::Moving(pattern) => solve_envelope(
            pattern,
            span_mm,
            settings.step_mm,
            settings.sweep_step_mm,
            settings.sweep_direction,
        )
        .map(InternalForces::Envelope),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{DistributedLoad, PointLoad};
    use approx::assert_relative_eq;

    const SPAN: f64 = 1200.0;

    fn midspan_point() -> StationaryLoads {
        StationaryLoads::new().with_point_load(PointLoad::new(600.0, 1000.0))
    }

    #[test]
    fn test_sample_count() {
        assert_eq!(sample_positions(SPAN, 1.0).unwrap().len(), 1201);
        let odd = sample_positions(SPAN, 7.0).unwrap();
        // ceil(1200/7) = 172 intervals
        assert_eq!(odd.len(), 173);
        assert_eq!(*odd.last().unwrap(), SPAN);
        assert_eq!(sample_positions(SPAN, 0.1).unwrap().len(), 12001);
        assert!(sample_positions(SPAN, 0.0).is_err());
        assert!(sample_positions(SPAN, f64::NAN).is_err());
    }

    #[test]
    fn test_last_sample_clamped_to_span() {
        // Overhang of half a micron past a single step
        let positions = sample_positions(1000.0, 999.9999995).unwrap();
        assert_eq!(positions.len(), 3);
        assert_eq!(*positions.last().unwrap(), 1000.0);

        let positions = sample_positions(1205.0, 10.0).unwrap();
        assert_eq!(positions.len(), 122);
        assert_eq!(positions[120], 1200.0);
        assert_eq!(positions[121], 1205.0);
    }

    #[test]
    fn test_tiny_step_is_rejected() {
        let err = sample_positions(SPAN, 1e-300).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LOAD");
        assert!(sample_positions(SPAN, 1e-3).is_err());
        assert!(sample_positions(SPAN, 0.01).is_ok());

        let err = solve_stationary(&midspan_point(), SPAN, 1e-300).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LOAD");

        // 240 001 stations for each of six axles
        let train = AxlePattern::six_wheel_train(400.0);
        let err = solve_envelope(&train, SPAN, 0.005, 0.005, SweepDirection::LeftToRight).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LOAD");
    }

    #[test]
    fn test_bad_step_same_error_from_every_entry_point() {
        let pattern = AxlePattern::new(vec![100.0], vec![]).unwrap();
        let settings = AnalysisSettings {
            step_mm: 0.0,
            ..AnalysisSettings::default()
        };
        let codes = [
            solve_stationary(&midspan_point(), SPAN, 0.0).unwrap_err().error_code(),
            solve_envelope(&pattern, SPAN, 0.0, 0.0, SweepDirection::LeftToRight).unwrap_err().error_code(),
            solve(&LoadCase::Stationary(midspan_point()), SPAN, &settings).unwrap_err().error_code(),
            solve(&LoadCase::Moving(pattern.clone()), SPAN, &settings).unwrap_err().error_code(),
        ];
        assert!(codes.iter().all(|&code| code == "INVALID_LOAD"), "{:?}", codes);
    }

    #[test]
    fn test_sweep_coarser_than_samples_is_rejected() {
        let pattern = AxlePattern::new(vec![100.0], vec![]).unwrap();
        let err = solve_envelope(&pattern, SPAN, 1.0, 100.0, SweepDirection::LeftToRight).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LOAD");

        // A finer sweep grid is fine and stays exact at the samples
        let envelope = solve_envelope(&pattern, SPAN, 10.0, 2.5, SweepDirection::LeftToRight).unwrap();
        for s in &envelope.samples {
            let exact = 100.0 * s.position_mm * (SPAN - s.position_mm) / SPAN;
            assert!((s.max_moment_nmm - exact).abs() < 1e-6);
        }
    }

    #[test]
    fn test_midspan_point_load_diagrams() {
        let profile = solve_stationary(&midspan_point(), SPAN, 1.0).unwrap();

        let peak = profile.max_moment();
        assert_relative_eq!(peak.moment_nmm, 300_000.0, max_relative = 1e-12);
        assert_relative_eq!(peak.position_mm, 600.0);

        for s in &profile.samples {
            if s.position_mm < 600.0 {
                assert_relative_eq!(s.shear_n, 500.0, max_relative = 1e-12);
            } else {
                assert_relative_eq!(s.shear_n, -500.0, max_relative = 1e-12);
            }
        }
        assert_relative_eq!(profile.max_abs_shear().shear_n, 500.0, max_relative = 1e-12);
    }

    #[test]
    fn test_moment_closes_at_supports() {
        let loads = StationaryLoads::new()
            .with_point_load(PointLoad::new(123.4, 250.0))
            .with_point_load(PointLoad::new(877.7, 90.0))
            .with_distributed_load(DistributedLoad::full(0.3))
            .with_distributed_load(DistributedLoad::partial(1.1, 310.5, 642.25));

        for step in [1.0, 7.0, 33.3] {
            let profile = solve_stationary(&loads, SPAN, step).unwrap();
            let first = profile.samples[0];
            let last = profile.samples[profile.samples.len() - 1];
            assert_eq!(first.moment_nmm, 0.0);
            assert!(last.moment_nmm.abs() < 1e-6, "M(L) = {} at step {}", last.moment_nmm, step);
        }
    }

    #[test]
    fn test_integration_exact_between_samples() {
        // Load between samples: moment at 595 must still be exact
        let loads = StationaryLoads::new().with_point_load(PointLoad::new(600.0, 1000.0));
        let profile = solve_stationary(&loads, SPAN, 7.0).unwrap();
        for s in &profile.samples {
            let exact = if s.position_mm <= 600.0 {
                500.0 * s.position_mm
            } else {
                500.0 * (SPAN - s.position_mm)
            };
            assert!((s.moment_nmm - exact).abs() < 1e-6);
        }
    }

    #[test]
    fn test_uniform_load_parabola() {
        let loads = StationaryLoads::new().with_distributed_load(DistributedLoad::full(1.0));
        let profile = solve_stationary(&loads, SPAN, 10.0).unwrap();
        // wL²/8 = 180000 at midspan
        let peak = profile.max_moment();
        assert_relative_eq!(peak.moment_nmm, 180_000.0, max_relative = 1e-12);
        assert_relative_eq!(peak.position_mm, 600.0);
    }

    #[test]
    fn test_envelope_dominates_every_sweep_position() {
        let pattern = AxlePattern::six_wheel_train(400.0);
        let envelope = solve_envelope(&pattern, SPAN, 10.0, 10.0, SweepDirection::LeftToRight).unwrap();

        let stations = sample_positions(SPAN, 10.0).unwrap();
        for lead in pattern.sweep_positions(&stations, SweepDirection::LeftToRight).into_iter().step_by(7) {
            let placed = pattern.place(lead, SPAN, SweepDirection::LeftToRight);
            let profile = solve_stationary(&placed, SPAN, 10.0).unwrap();
            for (env, s) in envelope.samples.iter().zip(&profile.samples) {
                assert!(env.max_shear_n >= s.shear_n);
                assert!(env.min_shear_n <= s.shear_n);
                assert!(env.max_moment_nmm >= s.moment_nmm);
                assert!(env.min_moment_nmm <= s.moment_nmm);
            }
        }
    }

    #[test]
    fn test_single_axle_envelope_matches_influence_line() {
        // One axle P: max moment at x is P x (L - x) / L
        let pattern = AxlePattern::new(vec![100.0], vec![]).unwrap();
        let envelope = solve_envelope(&pattern, SPAN, 100.0, 100.0, SweepDirection::LeftToRight).unwrap();
        for s in &envelope.samples {
            let exact = 100.0 * s.position_mm * (SPAN - s.position_mm) / SPAN;
            assert!((s.max_moment_nmm - exact).abs() < 1e-6);
        }
        // Peak occurs with the axle right over midspan
        let peak = envelope.max_moment();
        assert_relative_eq!(peak.position_mm, 600.0);
        assert_relative_eq!(peak.max_moment_lead_mm, 600.0);
    }

    #[test]
    fn test_ties_keep_first_sweep_position() {
        // Once the axle has left, every later sweep gives the same zero diagram.
        let pattern = AxlePattern::new(vec![100.0], vec![]).unwrap();
        let envelope = solve_envelope(&pattern, SPAN, 600.0, 600.0, SweepDirection::LeftToRight).unwrap();
        // Sweep: 0, 600, 1200. At x = 0 the moment is 0 for every lead; the first lead wins.
        assert_eq!(envelope.samples[0].max_moment_lead_mm, 0.0);
        assert_eq!(envelope.characteristic.len(), 3);
    }

    #[test]
    fn test_direction_does_not_change_symmetric_envelope() {
        let pattern = AxlePattern::new(vec![50.0, 50.0], vec![200.0]).unwrap();
        let forward = solve_envelope(&pattern, SPAN, 10.0, 10.0, SweepDirection::LeftToRight).unwrap();
        let backward = solve_envelope(&pattern, SPAN, 10.0, 10.0, SweepDirection::RightToLeft).unwrap();
        assert_relative_eq!(
            forward.max_moment().max_moment_nmm,
            backward.max_moment().max_moment_nmm,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_non_aligned_span_envelope_exact_in_both_directions() {
        // 1205 / 10 leaves a 5 mm closing interval
        let span = 1205.0;
        let pattern = AxlePattern::new(vec![100.0], vec![]).unwrap();
        let forward = solve_envelope(&pattern, span, 10.0, 10.0, SweepDirection::LeftToRight).unwrap();
        let backward = solve_envelope(&pattern, span, 10.0, 10.0, SweepDirection::RightToLeft).unwrap();

        for envelope in [&forward, &backward] {
            for s in &envelope.samples {
                let exact = 100.0 * s.position_mm * (span - s.position_mm) / span;
                assert!(
                    (s.max_moment_nmm - exact).abs() < 1e-6,
                    "x = {}: {} vs {} ({})",
                    s.position_mm,
                    s.max_moment_nmm,
                    exact,
                    envelope.direction.display_name()
                );
            }
        }

        let peak = forward.max_moment();
        assert_relative_eq!(peak.position_mm, 600.0);
        assert_relative_eq!(peak.max_moment_nmm, 100.0 * 600.0 * 605.0 / span, max_relative = 1e-12);
        assert_relative_eq!(
            backward.max_moment().max_moment_nmm,
            peak.max_moment_nmm,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_train_envelope_bounds_off_grid_positions() {
        let span = 1205.0;
        let train = AxlePattern::six_wheel_train(400.0);
        for direction in [SweepDirection::LeftToRight, SweepDirection::RightToLeft] {
            let envelope = solve_envelope(&train, span, 10.0, 10.0, direction).unwrap();
            // Leads at a 3.7 mm pitch, mostly off the sweep grid
            for i in 0..811 {
                let lead = -900.0 + 3.7 * i as f64;
                let placed = train.place(lead, span, direction);
                let profile = solve_stationary(&placed, span, 10.0).unwrap();
                for (env, s) in envelope.samples.iter().zip(&profile.samples) {
                    assert!(
                        env.max_moment_nmm >= s.moment_nmm - 1e-6,
                        "lead {} at x = {}: envelope {} below {} ({})",
                        lead,
                        s.position_mm,
                        env.max_moment_nmm,
                        s.moment_nmm,
                        direction.display_name()
                    );
                    assert!(env.min_moment_nmm <= s.moment_nmm + 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_loading_characteristic() {
        let pattern = AxlePattern::six_wheel_train(400.0);
        let envelope = solve_envelope(&pattern, SPAN, 5.0, 5.0, SweepDirection::LeftToRight).unwrap();
        let stations = sample_positions(SPAN, 5.0).unwrap();
        let sweep = pattern.sweep_positions(&stations, SweepDirection::LeftToRight);
        assert_eq!(envelope.characteristic.len(), sweep.len());

        let critical = envelope.critical_moment_position();
        assert_relative_eq!(critical.peak_moment_nmm, envelope.max_moment().max_moment_nmm, max_relative = 1e-12);
        assert!(envelope.critical_shear_position().peak_shear_n.abs() <= 400.0 + 1e-9);
    }

    #[test]
    fn test_solve_dispatch() {
        let settings = AnalysisSettings::default();
        match solve(&LoadCase::Stationary(midspan_point()), SPAN, &settings).unwrap() {
            InternalForces::Profile(p) => assert_eq!(p.samples.len(), 1201),
            InternalForces::Envelope(_) => panic!("expected a profile"),
        }
        let moving = LoadCase::Moving(AxlePattern::six_wheel_train(400.0));
        let forces = solve(&moving, SPAN, &AnalysisSettings { step_mm: 10.0, sweep_step_mm: 10.0, ..settings }).unwrap();
        assert!(matches!(forces, InternalForces::Envelope(_)));
        assert_eq!(forces.ranges().len(), 121);
    }

    #[test]
    fn test_profile_ranges_are_degenerate() {
        let profile = solve_stationary(&midspan_point(), SPAN, 100.0).unwrap();
        let forces = InternalForces::Profile(profile);
        for r in forces.ranges() {
            assert_eq!(r.max_moment_nmm, r.min_moment_nmm);
            assert_eq!(r.abs_shear_n(), 500.0);
        }
    }
}
