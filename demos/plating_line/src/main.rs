//! plating_line — the 24-station pretreatment and e-coat line.
//!
//! Five manipulators share one rail; neighbours overlap by one or two
//! stations so every carrier can be handed along.  The work order mixes
//! four recipes.  The event trace and completions are written to
//! `./output`, and the simulated schedule is replayed through the schedule
//! audit before the report is printed.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::Level;

use pl_core::{LineConfig, StationId};
use pl_line::{StationSpec, TemplateLibrary};
use pl_output::{CsvWriter, TraceOutputObserver};
use pl_rail::ManipulatorSpec;
use pl_sim::{audit_schedule, ScheduleRecorder, SimBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR: &str = "output";

/// `(name, distance from the entry in mm, submersible)`, in line order.
const STATIONS: [(&str, u32, bool); 24] = [
    ("Vstup do linky",                     0, false),
    ("Horký oplach - ponor",            2752, true),
    ("Postřikové odmaštění",            6016, true),
    ("Odmaštění – ponor I",             9626, true),
    ("Odmaštění – ponor II",           12338, true),
    ("Odmaštění – ponor III",          15069, true),
    ("Oplach I - ponor",               17381, true),
    ("Oplach II - ponor",              19706, true),
    ("Oplach III - ponor",             22018, true),
    ("Moření (kyselé čištění) – ponor", 24822, true),
    ("Oplach IV po moření - ponor",    27241, true),
    ("Oplach V po moření - ponor",     29550, true),
    ("Aktivace - ponor",               31859, true),
    ("Zn fosfátování - ponor",         34282, true),
    ("Oplach IV demi - ponor",         36696, true),
    ("Oplach V demi - ponor",          39006, true),
    ("Pasivace - ponor",               41323, true),
    ("Demi oplach - ponor",            43633, true),
    ("Převážecí vozík předúprava",     45955, true),
    ("KTL barva - ponor",              49805, true),
    ("UF oplach 1 - ponor",            53073, true),
    ("UF oplach 2 - ponor",            55377, true),
    ("Demi oplach 2 - ponor",          57687, true),
    ("Výstup z linky",                 60000, false),
];

/// `(first station, last station, start station)` per manipulator.
const MANIPULATORS: [(u32, u32, u32); 5] = [(0, 5, 0), (4, 10, 5), (8, 13, 9), (12, 17, 14), (17, 23, 18)];

const RECIPES: [(&str, [(u32, u32); 6]); 4] = [
    ("Test1", [(0, 0), (5, 1), (10, 3), (12, 5), (17, 3), (23, 0)]),
    ("Test2", [(0, 0), (5, 4), (10, 3), (12, 5), (17, 3), (23, 0)]),
    ("Test3", [(0, 0), (5, 4), (10, 2), (12, 5), (17, 3), (23, 0)]),
    ("Test4", [(0, 0), (4, 50), (8, 60), (13, 13), (17, 10), (23, 0)]),
];

/// Recipe index per carrier, in admission order.
const WORK_ORDER: [usize; 5] = [0, 3, 1, 2, 0];

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    println!("plating_line: {} stations, {} manipulators", STATIONS.len(), MANIPULATORS.len());

    // ── Line description ──────────────────────────────────────────────────
    let stations = STATIONS
        .iter()
        .map(|&(name, mm, submersible)| StationSpec::new(name, f64::from(mm) / 1000.0, submersible));
    let manipulators = MANIPULATORS
        .iter()
        .map(|&(first, last, start)| ManipulatorSpec::span(first, last, start));

    let mut library = TemplateLibrary::new();
    let mut templates = Vec::with_capacity(RECIPES.len());
    for (name, steps) in RECIPES {
        let steps = steps.iter().map(|&(s, t)| (StationId(s), t)).collect();
        templates.push(library.add(name, steps)?);
    }
    let order = WORK_ORDER.iter().map(|&i| templates[i]).collect();

    let t0 = Instant::now();
    let mut sim = SimBuilder::new(LineConfig::default(), library)
        .stations(stations)
        .manipulators(manipulators)
        .work_order(order)
        .build()?;
    println!("Build: {:.1}ms", t0.elapsed().as_secs_f64() * 1000.0);

    // ── Run ───────────────────────────────────────────────────────────────
    let out_dir = Path::new(OUTPUT_DIR);
    fs::create_dir_all(out_dir)?;
    let mut observer = (TraceOutputObserver::new(CsvWriter::new(out_dir)?), ScheduleRecorder::new());

    let t1 = Instant::now();
    let report = sim.run(&mut observer)?;
    println!("Run:   {:.1}ms", t1.elapsed().as_secs_f64() * 1000.0);

    let (mut output, recorder) = observer;
    if let Some(e) = output.take_error() {
        eprintln!("output error: {e}");
    }

    // ── Audit ─────────────────────────────────────────────────────────────
    let violations = audit_schedule(&recorder.into_schedule(), &sim.world);
    if violations.is_empty() {
        println!("Schedule audit: clean");
    } else {
        for v in &violations {
            println!("Schedule audit: {v}");
        }
    }

    println!();
    println!("{report}");
    println!("Trace written to {}/events.csv and {}/completions.csv", OUTPUT_DIR, OUTPUT_DIR);

    report.into_result()?;
    Ok(())
}
