use fragcore::*;
use clap::Parser;
use anyhow::{anyhow, Context};

/// A fixed-partition memory allocation simulator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Total memory size
    #[arg(short, long, allow_hyphen_values = true)]
    total:      String,

    /// Fragmentation scenario
    #[arg(value_enum)]
    scenario:   ScenarioKind,

    /// Process sizes (candidate sizes for the external scenario).
    /// Prompted for on stdin when neither these nor --input are given.
    #[arg(allow_hyphen_values = true)]
    sizes:      Vec<String>,

    /// Read sizes from a file
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf), conflicts_with = "sizes")]
    input:      Option<PathBuf>,

    /// Size file format
    #[arg(long, value_enum, default_value_t = InputFormat::List)]
    format:     InputFormat,

    /// How many sizes to prompt for (internal scenario only)
    #[arg(short = 'n', long)]
    count:      Option<String>,

    /// Allocation strategy (best, worst, first). Repeat to compare.
    #[arg(short, long = "fit", default_value = "best")]
    fits:       Vec<String>,

    /// Where to save the last report as JSON
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    json:       Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Args::parse();
    // Unknown names are fatal, and better caught before any prompting.
    let strategies = cli.fits
        .iter()
        .map(|f| f.parse::<Strategy>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut sim = Simulator::new();
    let given = if let Some(path) = cli.input {
        Some(read_from_path(cli.format, path.clone())
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("Reading sizes from {}", path.display()))?)
    } else if !cli.sizes.is_empty() {
        Some(cli.sizes)
    } else { None };

    match (cli.scenario, given) {
        (ScenarioKind::Internal, Some(sizes))   => { sim.submit_internal(cli.total.as_str(), sizes)?; },
        (ScenarioKind::External, Some(sizes))   => { sim.submit_external(cli.total.as_str(), sizes)?; },
        (ScenarioKind::Internal, None)  => {
            let raw = cli.count
                .ok_or_else(|| anyhow!("The internal scenario needs sizes, --input or --count"))?;
            let n = parse_count(&raw)?;
            let stdin = std::io::stdin();
            let answers = Prompter::new(stdin.lock(), std::io::stdout())
                .take(n)
                .collect::<Result<Vec<String>, FragError>>()?;
            if answers.len() < n {
                return Err(anyhow!("Input ended after {} of {} process sizes", answers.len(), n));
            }
            sim.submit_internal(cli.total.as_str(), answers)?;
        },
        (ScenarioKind::External, None)  => {
            let stdin = std::io::stdin();
            sim.submit_external(cli.total.as_str(), Prompter::new(stdin.lock(), std::io::stdout()))?;
        },
    }

    if let Some(s) = sim.scenario() {
        println!(
            "{}: {} partitions, {} processes, {} candidates rejected",
            s.kind(),
            s.partitions().count(),
            s.processes().len(),
            s.rejected().len()
        );
        for r in s.rejected() {
            println!("\t{r}");
        }
    }

    for strategy in strategies {
        let res = sim.allocate_with(strategy)?;
        println!("\n== {strategy} ==");
        for rec in &res.records {
            match &rec.outcome {
                Outcome::Allocated { block, .. }    => {
                    println!("Process {}\t({})\t-> {block}", rec.process, fmt_units(rec.size));
                },
                Outcome::NotAllocated(why)          => {
                    println!("Process {}\t({})\t-> Not Allocated: {why}", rec.process, fmt_units(rec.size));
                }
            }
        }
        if !res.all_placed() {
            println!("Not allocated: process {}", res.failures().map(|f| f.process).join(", "));
        }
        let report = sim.report()?;
        for row in &report.partitions {
            println!(
                "{}\t{}\t{}\tneeds {}\tof {}\t({} unused)",
                row.name,
                row.process_no.map(|n| n.to_string()).unwrap_or_else(|| "N/A".to_string()),
                row.status,
                fmt_units(row.space_required),
                fmt_units(row.block_size),
                fmt_units(row.unused_space)
            );
        }
        let st = &report.stats;
        println!("Used:\t\t\t{} of {}\nInternal frag.:\t\t{}\nExternal frag.:\t\t{}\nUtilization:\t\t{:.2}%",
            fmt_units(st.used),
            fmt_units(st.total_memory),
            fmt_units(st.internal_fragmentation),
            fmt_units(st.external_fragmentation),
            st.utilization * 100.0
        );
    }

    if let Some(path) = cli.json {
        let report = sim.report()?;
        std::fs::write(&path, report.to_json()?)
            .with_context(|| format!("Writing report to {}", path.display()))?;
        println!("\nReport saved to {}", path.display());
    }

    Ok(())
}
