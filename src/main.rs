//! `precision_hh` command-line driver: reads a network-trace or binary item
//! stream and reports the items estimated to exceed a frequency threshold.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use precision_hh::common::HhError;
use precision_hh::hh::{HeavyHitter, SketchKind};
use precision_hh::prng::Prng;
use precision_hh::stream::{self, Format};

/// Which sketch variant(s) to run a given dyadic tree over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Variant {
    Min,
    Median,
    Const,
}

impl Variant {
    fn label(self) -> &'static str {
        match self {
            Variant::Min => "min",
            Variant::Median => "median",
            Variant::Const => "const",
        }
    }
}

/// Hierarchical heavy-hitter detection over integer and network-trace
/// streams.
#[derive(Parser, Debug)]
#[command(name = "precision_hh", about = "Detect frequency heavy hitters in a stream")]
struct Cli {
    /// Input file; format is inferred from a substring of the filename
    /// (`NUST`, `DARPA`, or `Zipfian`/`Weighted` for the binary format).
    #[arg(short, long)]
    file: PathBuf,

    /// Per-level error bound for the frequency sketches.
    #[arg(short, long, default_value_t = 1.0 / 64.0)]
    epsilon: f64,

    /// Failure probability bound for the frequency sketches.
    #[arg(short, long, default_value_t = 0.25)]
    delta: f64,

    /// Minimum fraction of total weight an item must reach to be reported.
    #[arg(short, long, default_value_t = 0.05)]
    phi: f64,

    /// Size of the item universe (exclusive upper bound on `uid`).
    #[arg(short = 'm', long, default_value_t = u32::MAX as u64)]
    universe: u64,

    /// Overrides the derived sketch width (independent-sketch variants only).
    #[arg(short, long)]
    width: Option<usize>,

    /// Overrides the derived sketch depth (independent-sketch variants only).
    #[arg(short = 'g', long)]
    height: Option<usize>,

    /// Run the count-min-sketch based implementation.
    #[arg(long)]
    min: bool,

    /// Run the count-median-sketch based implementation.
    #[arg(long)]
    median: bool,

    /// Run the level-partitioned constant-count-min-sketch implementation.
    #[arg(long)]
    r#const: bool,

    /// First PRNG seed.
    #[arg(short = '1', long, default_value_t = 1)]
    seed1: u32,

    /// Second PRNG seed.
    #[arg(short = '2', long, default_value_t = 1)]
    seed2: u32,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), HhError> {
    if cli.epsilon >= cli.phi {
        return Err(HhError::InvalidParameter {
            param: "epsilon".to_string(),
            value: cli.epsilon.to_string(),
            constraint: format!("must be smaller than phi ({})", cli.phi),
        });
    }

    let filename = cli
        .file
        .to_str()
        .ok_or_else(|| HhError::InputFormat {
            detail: "input filename is not valid UTF-8".to_string(),
        })?;
    let format = stream::infer_format(filename).ok_or_else(|| HhError::InputFormat {
        detail: format!(
            "unable to infer input format from filename {:?}; expected a substring of \
             NUST, DARPA, Zipfian, or Weighted",
            filename
        ),
    })?;

    info!(
        "parameters: m={} epsilon={} delta={} phi={} seed1={} seed2={}",
        cli.universe, cli.epsilon, cli.delta, cli.phi, cli.seed1, cli.seed2
    );

    let variants = selected_variants(cli);
    info!("running {} implementation(s)", variants.len());

    let records = stream::read_records(&cli.file, format)?;
    info!("read {} records from {:?}", records.len(), cli.file);

    let mut engines = Vec::with_capacity(variants.len());
    for &variant in &variants {
        let mut prng = Prng::new(cli.seed1, cli.seed2);
        let engine = build_engine(cli, variant, &mut prng)?;
        engines.push((variant, engine));
    }

    for (_, engine) in engines.iter_mut() {
        for record in &records {
            engine.update(record.uid, record.weight);
        }
    }

    println!("Implementation,IP-Address,Index");
    for (variant, engine) in &engines {
        for uid in engine.query() {
            println!("{},{},{}", variant.label(), format_ipv4(uid), uid);
        }
    }

    Ok(())
}

fn selected_variants(cli: &Cli) -> Vec<Variant> {
    let mut variants = Vec::new();
    if cli.min {
        variants.push(Variant::Min);
    }
    if cli.median {
        variants.push(Variant::Median);
    }
    if cli.r#const {
        variants.push(Variant::Const);
    }
    if variants.is_empty() {
        variants = vec![Variant::Min, Variant::Median, Variant::Const];
    }
    variants
}

fn build_engine(cli: &Cli, variant: Variant, prng: &mut Prng) -> Result<HeavyHitter, HhError> {
    match (variant, cli.width, cli.height) {
        (Variant::Min, Some(width), Some(depth)) => HeavyHitter::independent_with_dimensions(
            width,
            depth,
            cli.phi,
            cli.universe,
            SketchKind::CountMin,
            prng,
        ),
        (Variant::Median, Some(width), Some(depth)) => HeavyHitter::independent_with_dimensions(
            width,
            depth,
            cli.phi,
            cli.universe,
            SketchKind::CountMedian,
            prng,
        ),
        (Variant::Min, _, _) => {
            HeavyHitter::independent(cli.epsilon, cli.delta, cli.phi, cli.universe, SketchKind::CountMin, prng)
        }
        (Variant::Median, _, _) => HeavyHitter::independent(
            cli.epsilon,
            cli.delta,
            cli.phi,
            cli.universe,
            SketchKind::CountMedian,
            prng,
        ),
        (Variant::Const, _, _) => {
            HeavyHitter::constant(cli.epsilon, cli.delta, cli.phi, cli.universe, prng)
        }
    }
}

/// Formats a `u32` as the dotted-quad IPv4 address it was packed from,
/// zero-padding each octet to three digits (matching the source driver's
/// `%03"PRIu8"` formatting).
fn format_ipv4(uid: u32) -> String {
    format!(
        "{:03}.{:03}.{:03}.{:03}",
        (uid >> 24) & 0xff,
        (uid >> 16) & 0xff,
        (uid >> 8) & 0xff,
        uid & 0xff
    )
}
