#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

//! Measures how many probe collisions `Table` incurs per insertion as the
//! number of keys grows, for a raw identity hash and for `DefaultHasher`,
//! and plots the result.

use std::{io, path::PathBuf};

use clap::Parser;
use hashtab::{Callbacks, Table, TableStats};
use log::info;
use plotters::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

// Create key counts from 10% to 100% of --max-keys with 10 steps
const NUM_RUNS: usize = 10;

// Keys are drawn from this range, so raw keys cluster modulo small capacities
const KEY_RANGE: std::ops::Range<u64> = 1..1_000_000;

// Hash functions to compare
const METHODS: [&str; 2] = ["Identity hash", "DefaultHasher"];

#[derive(Parser, Debug)]
#[command(name = "probe_report", about = "Charts linear-probing collisions against table size")]
struct Args {
    /// Largest number of keys inserted in a single run
    #[arg(long, default_value_t = 100_000)]
    max_keys: usize,

    /// Directory the chart is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Seed for the key generator; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long)]
    verbose: bool,
}

fn print_pair(key: &u64, value: &u64, out: &mut dyn io::Write) -> io::Result<()> {
    write!(out, "{key}, {value}")
}

// Keys hash to themselves, so placement is `key mod capacity`
fn identity_table() -> Table<u64, u64> {
    Table::new(Callbacks::new(|key: &u64| *key, |a: &u64, b: &u64| a == b, print_pair))
}

fn sip_table() -> Table<u64, u64> {
    Table::new(Callbacks::standard())
}

// Inserts the first `n_keys` keys and returns the final counters
fn run(mut table: Table<u64, u64>, keys: &[u64], n_keys: usize) -> TableStats {
    for (i, &key) in keys.iter().take(n_keys).enumerate() {
        table.put(key, i as u64);
    }
    table.stats()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let log_level = if args.verbose { log::LevelFilter::Info } else { log::LevelFilter::Warn };
    env_logger::builder().filter_level(log_level).init();

    let num_keys: Vec<usize> =
        (1..=NUM_RUNS).map(|i| (args.max_keys * i / NUM_RUNS).max(1)).collect();
    println!("Number of keys: {num_keys:?}");

    // Generate keys once so every method sees the same sequence
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let max_keys_needed = num_keys.iter().copied().max().unwrap_or(0);
    let keys: Vec<u64> = (0..max_keys_needed).map(|_| rng.random_range(KEY_RANGE)).collect();

    let mut collisions_per_insert: Vec<Vec<f64>> = vec![Vec::new(); METHODS.len()];

    for &n_keys in &num_keys {
        println!("Testing with {n_keys} keys");

        for (method_idx, &method) in METHODS.iter().enumerate() {
            let table = if method_idx == 0 { identity_table() } else { sip_table() };
            let stats = run(table, &keys, n_keys);
            let per_insert = stats.collisions as f64 / n_keys as f64;
            collisions_per_insert[method_idx].push(per_insert);

            info!("{method} with {n_keys} keys: {stats:?}");
            println!(
                "  {}: Collisions/insert = {:.2}, Rehashes = {}, Capacity = {}, Load = {:.2}",
                method,
                per_insert,
                stats.rehashes,
                stats.capacity,
                stats.load_factor()
            );
        }
    }

    let font_family = "sans-serif";
    let colors = [RGBColor(220, 50, 50), RGBColor(50, 90, 220)];

    let path = args.output_dir.join("collisions_per_insert.png");
    let root = BitMapBackend::new(&path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_avg = collisions_per_insert
        .iter()
        .flat_map(|v| v.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1 + f64::EPSILON; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Linear Probing Collisions per Insertion", (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..num_keys.len(), 0.0..max_avg)?;

    let x_labels: Vec<String> = num_keys.iter().map(ToString::to_string).collect();

    chart
        .configure_mesh()
        .x_labels(num_keys.len())
        .x_label_formatter(&|x| x_labels.get(*x).cloned().unwrap_or_default())
        .x_desc("Number of Keys Inserted")
        .y_desc("Collisions per Insertion")
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (method_idx, &method) in METHODS.iter().enumerate() {
        let color = &colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(2);

        chart
            .draw_series(LineSeries::new(
                collisions_per_insert[method_idx].iter().enumerate().map(|(i, &y)| (i, y)),
                line_style,
            ))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            collisions_per_insert[method_idx]
                .iter()
                .enumerate()
                .map(|(i, &y)| Circle::new((i, y), 4, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    println!("Generated plot image: {}", path.display());

    Ok(())
}
