//! Example: load the five yearly survey files and print the tables a
//! dashboard would render.
//!
//! Usage:
//!   cargo run --example dashboard -- <2015.csv> <2016.csv> <2017.csv> <2018.csv> <2019.csv>

use std::env;
use std::path::Path;

use felicity::{Dashboard, YearFile};

fn main() -> felicity::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example dashboard -- <year.csv> [<year.csv> ...]");
        eprintln!("\nFiles are assigned years 2015.. in argument order.");
        std::process::exit(1);
    }

    let files: Vec<YearFile> = args[1..]
        .iter()
        .enumerate()
        .map(|(i, path)| YearFile::new(2015 + i as u16, Path::new(path)))
        .collect();

    for file in &files {
        if !file.path.exists() {
            eprintln!("Error: File not found: {}", file.path.display());
            std::process::exit(1);
        }
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("World Happiness Dashboard ({} years)", files.len());
    println!("{}", separator);
    println!();

    let dashboard = Dashboard::load(&files)?;

    println!("## Sources");
    for source in dashboard.sources() {
        println!(
            "  {:12} {:>4} rows, {:>2} columns, {}",
            source.file, source.row_count, source.column_count, source.hash
        );
    }
    println!();

    println!("## Consolidated Table");
    println!("  Summary rows:  {}", dashboard.summary().rows.len());
    println!(
        "  Detailed rows: {} ({} dropped for missing factors)",
        dashboard.detailed().rows.len(),
        dashboard.detailed().dropped_rows
    );
    println!("  Countries:     {}", dashboard.table().countries().len());
    println!();

    println!("## Global Mean Score by Year");
    for (year, mean) in dashboard.table().global_mean_by_year() {
        println!("  {}  {:.3}", year, mean);
    }
    println!();

    let latest = files.iter().map(|f| f.year).max().unwrap_or(2019);

    println!("## Top 10, {}", latest);
    for record in dashboard.table().top_n(latest, 10) {
        println!("  {:>3}. {:30} {:.3}", record.rank, record.country, record.score);
    }
    println!();

    println!("## Continent Means, {}", latest);
    let breakdown = dashboard.continent_breakdown(latest);
    for (continent, mean) in &breakdown.means {
        println!("  {:10} {:.3}", continent.to_string(), mean);
    }
    if !breakdown.unmatched.is_empty() {
        println!("  (no continent for: {})", breakdown.unmatched.join(", "));
    }
    println!();

    println!("{}", separator);

    Ok(())
}
