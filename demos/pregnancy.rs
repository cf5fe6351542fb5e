//! Pregnancy-length analysis over the NSFG 2002 pregnancy file
//!
//! Compares first and later live births: mean and median length, the
//! probability of being born early, on time or late, and the chance of
//! birth in a given week for pregnancies that have lasted that long.
//!
//! Run with: cargo run --example pregnancy -- data/2002FemPreg.dat

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use thinkstats::records::{FieldKind, Record, RecordError, Schema};
use thinkstats::Stats;

const DEFAULT_PATH: &str = "data/2002FemPreg.dat";

#[derive(clap::Parser)]
struct Args {
    /// Path to the NSFG fixed-width pregnancy file
    #[clap(default_value = DEFAULT_PATH)]
    path: PathBuf,
}

fn pregnancy_schema() -> Result<Schema, RecordError> {
    Schema::new()
        .field("caseid", 1, 12, FieldKind::Number)?
        .field("prglength", 275, 276, FieldKind::Number)?
        .field("outcome", 277, 277, FieldKind::Number)?
        .field("birthord", 278, 279, FieldKind::Number)?
        .field("finalwgt", 423, 440, FieldKind::Number)
}

fn lengths<'a>(records: impl Iterator<Item = &'a Record>) -> Stats {
    records.filter_map(|r| r.number("prglength")).collect()
}

fn report(label: &str, durations: &Stats) {
    println!("Mean pregnancy weeks for {label}: {:.4}", durations.amean());
    println!("Median pregnancy weeks for {label}: {}", durations.median());
    println!("Stddev of pregnancy weeks for {label}: {:.4}", durations.stddev());
    println!("Probability {label} is early: {:.4}", durations.pmf_of(0..=37));
    println!("Probability {label} is on time: {:.4}", durations.pmf_of(38..=40));
    println!("Probability {label} is late: {:.4}", durations.pmf_of(41..=50));
}

fn run(path: &Path) -> Result<(), RecordError> {
    let pregnancies = pregnancy_schema()?.read_file(path)?;
    println!("Number of pregnancies: {}", pregnancies.len());

    let live: Vec<&Record> = pregnancies
        .iter()
        .filter(|p| p.number("outcome") == Some(1.0))
        .collect();
    let (first, other): (Vec<&Record>, Vec<&Record>) = live
        .iter()
        .copied()
        .partition(|p| p.number("birthord") == Some(1.0));

    let first = lengths(first.into_iter());
    let other = lengths(other.into_iter());

    println!("Number of live births: {}", live.len());
    println!("Number of first live births: {}", first.count());
    println!("Number of second+ live births: {}", other.count());

    report("first child", &first);
    report("second+ child", &other);

    let difference = (first.amean() - other.amean()).abs();
    println!("Difference in hours: {:.2}", difference * 7.0 * 24.0);

    for week in 36..=41 {
        println!("Probability of week {week} for first child: {:.4}", first.pmf(f64::from(week)));
    }
    for week in 36..49 {
        println!(
            "Probability of being born in week {week} if not born before: {:.4}",
            first.hazard(f64::from(week))
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    match run(&args.path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}: {err}", args.path.display());
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
