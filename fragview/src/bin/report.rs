use fragview::*;
use clap::Parser;
use anyhow::Context;

/// Renders a report saved by `fragsim --json` as a table
/// and, optionally, a bar chart.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arg {
    /// Path to the JSON report
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    input:  PathBuf,

    /// Where to write the PNG chart
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Arg::parse();
    let report = load_report(&cli.input)
        .with_context(|| format!("Loading {}", cli.input.display()))?;

    println!("{} over {} units", report.kind, fmt_units(report.total_memory));
    match report.strategy {
        Some(s) => { println!("Allocation algorithm: {s}\n"); },
        None    => { println!("No allocation has run yet\n"); }
    }
    println!("{}\n", table::render(&report.partitions));
    for r in &report.rejected {
        println!("{r}");
    }
    for rec in &report.placements {
        if let fragcore::Outcome::NotAllocated(why) = &rec.outcome {
            println!("{why}");
        }
    }
    println!("{}", table::summary(&report.stats));

    if let Some(img) = cli.output {
        plot::plot_partitions(&report.partitions, &img)?;
        println!("\nChart saved to {}", img.display());
    }

    Ok(())
}
