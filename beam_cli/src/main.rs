//! # Girder CLI
//!
//! Runs a girder analysis from a JSON `AnalysisInput` file, or a built-in
//! demo (matboard box girder under the six-wheel train) when no file is
//! given, and prints a report.
//!
//! ```text
//! beam_cli [INPUT] [--material <NAME>] [--json]
//! ```
//!
//! Set `RUST_LOG=debug` for solver diagnostics.

use std::fs;
use std::process::ExitCode;

use clap::{Arg, ArgAction, Command};

use beam_core::calculations::{calculate, AnalysisInput, AnalysisResult, InternalForces, PlateCheck, PlateSupport};
use beam_core::loads::{AxlePattern, LoadCase};
use beam_core::materials::MaterialLimits;
use beam_core::section::{CrossSectionBuilder, GlueJoint, Segment};
use beam_core::settings::AnalysisSettings;
use beam_core::{CalcError, CalcResult};

/// Matboard thickness (mm)
const BOARD_MM: f64 = 1.27;

fn main() -> ExitCode {
    env_logger::init();

    let matches = Command::new("beam_cli")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Failure analysis of built-up girders")
        .arg(
            Arg::new("input")
                .help("AnalysisInput JSON file; runs the box-girder demo when omitted")
                .required(false),
        )
        .arg(
            Arg::new("material")
                .short('m')
                .long("material")
                .value_name("NAME")
                .help("Replace the input's material with a named preset (e.g. matboard)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Also print the full result as JSON"),
        )
        .get_matches();

    let run = || -> CalcResult<AnalysisResult> {
        let mut input = match matches.get_one::<String>("input") {
            Some(path) => load_input(path)?,
            None => demo_input(),
        };
        if let Some(name) = matches.get_one::<String>("material") {
            input.material = MaterialLimits::preset(name)?;
        }
        calculate(&input)
    };

    match run() {
        Ok(result) => {
            print_report(&result);
            if matches.get_flag("json") {
                println!();
                println!("JSON Output:");
                if let Ok(json) = serde_json::to_string_pretty(&result) {
                    println!("{}", json);
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn load_input(path: &str) -> CalcResult<AnalysisInput> {
    let text = fs::read_to_string(path).map_err(|e| CalcError::file_error("read", path, e.to_string()))?;
    let input = serde_json::from_str(&text)?;
    log::debug!("Loaded analysis input from {}", path);
    Ok(input)
}

/// Box girder: 100 mm deck on glue tabs, two webs, 80 mm bottom flange
fn demo_input() -> AnalysisInput {
    let t = BOARD_MM;
    let web_height = 75.0 - 2.0 * t;
    let section = CrossSectionBuilder::new()
        .with_segment(Segment::new(1, 100.0, t, 75.0))
        .with_segment(Segment::new(2, 5.0, t, 75.0 - t))
        .with_segment(Segment::new(3, 5.0, t, 75.0 - t))
        .with_segment(Segment::new(4, t, web_height, t))
        .with_segment(Segment::new(5, t, web_height, t))
        .with_segment(Segment::new(6, 80.0, t, 0.0))
        .with_glue_joint(GlueJoint::new(2, 1, 5.0))
        .with_glue_joint(GlueJoint::new(3, 1, 5.0))
        .with_glue_joint(GlueJoint::new(6, 4, t))
        .with_glue_joint(GlueJoint::new(6, 5, t));

    AnalysisInput {
        label: "Demo box girder".to_string(),
        span_mm: 1200.0,
        section,
        load_case: LoadCase::Moving(AxlePattern::six_wheel_train(400.0)),
        material: MaterialLimits::matboard(),
        plates: vec![
            PlateCheck::new(1, PlateSupport::BothEdgesRestrained).with_unsupported_width(80.0 - 2.0 * t),
            PlateCheck::new(1, PlateSupport::OneEdgeFree).with_unsupported_width(10.0),
            PlateCheck::new(4, PlateSupport::WebFlexure),
            PlateCheck::new(4, PlateSupport::WebShear).with_diaphragm_spacing(400.0),
        ],
        settings: AnalysisSettings::default(),
    }
}

fn print_report(result: &AnalysisResult) {
    let section = &result.section;

    println!("═══════════════════════════════════════════════════════");
    println!("  GIRDER ANALYSIS: {}", result.label);
    println!("═══════════════════════════════════════════════════════");
    println!();
    println!("Section:");
    println!("  Area:      {:.1} mm²", section.total_area_mm2);
    println!("  Depth:     {:.2} mm", section.depth_mm);
    println!("  Centroid:  {:.2} mm from bottom", section.centroid_mm);
    println!("  I:         {:.4e} mm⁴", section.moment_of_inertia_mm4);
    println!("  S_top:     {:.0} mm³   S_bottom: {:.0} mm³", section.section_modulus_top_mm3, section.section_modulus_bottom_mm3);
    for level in &section.glue_levels {
        println!("  Glue:      y = {:.2} mm, t = {:.2} mm", level.height_mm, level.thickness_mm);
    }
    println!();
    println!("Demand (span {:.0} mm, applied load {:.1} N):", result.span_mm, result.applied_load_n);
    if let Some(r) = &result.reactions {
        println!("  R_left = {:.1} N, R_right = {:.1} N", r.left_n, r.right_n);
    }
    println!("  |M|_max = {:.0} N·mm", result.peak_moment_nmm);
    println!("  |V|_max = {:.1} N", result.peak_shear_n);
    if let InternalForces::Envelope(envelope) = &result.forces {
        let m = envelope.critical_moment_position();
        let v = envelope.critical_shear_position();
        println!(
            "  Sweep:   {} positions, {}",
            envelope.characteristic.len(),
            envelope.direction.display_name()
        );
        println!("  Worst moment with lead axle at {:.0} mm", m.lead_mm);
        println!("  Worst shear with lead axle at {:.0} mm", v.lead_mm);
    }
    println!();
    println!("Failure Modes:");
    for mode in &result.fos.modes {
        println!(
            "  {:<34} FOS {:>8}  ({:.3}/{:.3} MPa) at {:>8} {}",
            mode.mode.to_string(),
            format_fos(mode.fos),
            mode.demand_mpa,
            mode.capacity_mpa,
            mode.location_mm.map(|x| format!("{:.0} mm", x)).unwrap_or_else(|| "-".to_string()),
            status_icon(mode.passes())
        );
    }
    println!();
    println!("═══════════════════════════════════════════════════════");
    println!(
        "  RESULT: {} (governs: {})",
        if result.passes() { "PASS" } else { "FAIL" },
        result.fos.governing.mode
    );
    println!(
        "  FOS = {}, failure load = {:.1} N",
        format_fos(result.governing_fos()),
        result.failure_load_n()
    );
    println!("═══════════════════════════════════════════════════════");
}

fn format_fos(fos: f64) -> String {
    if fos.is_finite() {
        format!("{:.3}", fos)
    } else {
        "n/a".to_string()
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
