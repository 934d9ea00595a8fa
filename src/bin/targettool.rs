use clap::{Parser, Subcommand};
use shotgroup::metrics::{Calibration, MoaCalculator};
use shotgroup::models::Point;
use shotgroup::tools::{load_rgb, save_rgb};
use shotgroup::{ShotAnalyzer, merge};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "targettool", version, about = "shotgroup CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect shot holes on a target photo and print group statistics
    Detect {
        #[arg(long)]
        image: PathBuf,
        /// Where to write the annotated copy
        #[arg(long)]
        out: Option<PathBuf>,
        /// Pixels per inch (omit for the default 100)
        #[arg(long)]
        ppi: Option<f64>,
        /// Target distance in yards (default 100)
        #[arg(long)]
        yards: Option<f64>,
    },
    /// Derive pixels-per-inch from two reference points
    Calibrate {
        /// First reference point as x,y
        #[arg(long)]
        p1: String,
        /// Second reference point as x,y
        #[arg(long)]
        p2: String,
        /// Real-world distance between the points in inches
        #[arg(long)]
        inches: f64,
    },
    /// Recompute statistics from a persisted shots JSON file
    /// (array of [x, y] or [x, y, radius] rows)
    Stats {
        #[arg(long)]
        shots: PathBuf,
        #[arg(long)]
        ppi: Option<f64>,
        #[arg(long)]
        yards: Option<f64>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Detect {
            image,
            out,
            ppi,
            yards,
        } => detect_cmd(&image, out, ppi, yards),
        Command::Calibrate { p1, p2, inches } => calibrate_cmd(&p1, &p2, inches),
        Command::Stats { shots, ppi, yards } => stats_cmd(&shots, ppi, yards),
    }
}

fn calibration_from(ppi: Option<f64>, yards: Option<f64>) -> Calibration {
    let mut cal = Calibration::default();
    if let Some(ppi) = ppi {
        cal.pixels_per_inch = ppi;
    }
    if let Some(yards) = yards {
        cal.target_distance_yards = yards;
    }
    cal
}

fn detect_cmd(image: &PathBuf, out: Option<PathBuf>, ppi: Option<f64>, yards: Option<f64>) {
    let (rgb, width, height) = match load_rgb(image) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("failed to load {}: {e}", image.display());
            std::process::exit(1);
        }
    };
    println!("Loaded {}: {width}x{height}", image.display());

    let analyzer = ShotAnalyzer::with_calibration(calibration_from(ppi, yards));
    let start = Instant::now();
    let analysis = match analyzer.analyze(&rgb, width, height) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("analysis failed: {e}");
            std::process::exit(1);
        }
    };
    println!("Detection took {:.1?}", start.elapsed());

    for (i, shot) in analysis.shots.iter().enumerate() {
        println!("  #{:<3} ({}, {}) r={}", i + 1, shot.x, shot.y, shot.radius);
    }
    print_metrics(&analysis.metrics);

    if let Some(out) = out {
        match save_rgb(&analysis.annotated, &out) {
            Ok(()) => println!("Annotated image written to {}", out.display()),
            Err(e) => eprintln!("failed to write {}: {e}", out.display()),
        }
    }
}

fn calibrate_cmd(p1: &str, p2: &str, inches: f64) {
    let (p1, p2) = match (parse_point(p1), parse_point(p2)) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            eprintln!("points must be given as x,y");
            std::process::exit(1);
        }
    };
    match Calibration::from_reference_points(p1, p2, inches) {
        Ok(cal) => println!("pixels_per_inch = {:.2}", cal.pixels_per_inch),
        Err(e) => {
            eprintln!("calibration failed: {e}");
            std::process::exit(1);
        }
    }
}

fn stats_cmd(shots_path: &PathBuf, ppi: Option<f64>, yards: Option<f64>) {
    let raw = match std::fs::read_to_string(shots_path) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("failed to read {}: {e}", shots_path.display());
            std::process::exit(1);
        }
    };
    let rows: Vec<Vec<f64>> = match serde_json::from_str(&raw) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("failed to parse {}: {e}", shots_path.display());
            std::process::exit(1);
        }
    };
    let shots = match merge::shots_from_rows(&rows) {
        Ok(shots) => shots,
        Err(e) => {
            eprintln!("bad shot rows: {e}");
            std::process::exit(1);
        }
    };
    let calc = MoaCalculator::new(calibration_from(ppi, yards));
    print_metrics(&calc.group_statistics(&shots));
}

fn print_metrics(metrics: &shotgroup::GroupMetrics) {
    println!("Shots:            {}", metrics.shot_count);
    println!("Extreme spread:   {:.2} MOA", metrics.extreme_spread_moa);
    println!("Center-to-center: {:.2} MOA", metrics.center_to_center_moa);
    println!("Group size:       {:.2} in", metrics.group_size_inches);
    println!(
        "Group center:     ({:.1}, {:.1})",
        metrics.group_center[0], metrics.group_center[1]
    );
}

fn parse_point(s: &str) -> Option<Point> {
    let (x, y) = s.split_once(',')?;
    Some(Point::new(
        x.trim().parse().ok()?,
        y.trim().parse().ok()?,
    ))
}
