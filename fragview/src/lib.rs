//! Renders what `fragcore` computes. Nothing in here takes part in an
//! allocation; every function is a pure consumer of a [Report] or its
//! pieces.

pub use std::path::{Path, PathBuf};
pub use fragcore::{fmt_units, BlockStatus, FragStats, MemUnits, PartitionRow, Report};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("could not draw chart: {0}")]
    Draw(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Reads a report saved by `fragsim --json`.
pub fn load_report(path: &Path) -> Result<Report, ViewError> {
    let raw = std::fs::read_to_string(path)?;

    Ok(Report::from_json(&raw)?)
}

pub mod table {
    use super::*;
    use itertools::Itertools;

    pub const HEADERS: [&str; 6] = [
        "Block Name",
        "Process No",
        "Block Status",
        "Space Required",
        "Block Size",
        "Unused Space",
    ];

    pub fn cells(row: &PartitionRow) -> [String; 6] {
        [
            row.name.clone(),
            row.process_no
                .map(|n| n.to_string())
                .unwrap_or_else(|| String::from("N/A")),
            row.status.to_string(),
            fmt_units(row.space_required),
            fmt_units(row.block_size),
            fmt_units(row.unused_space),
        ]
    }

    /// Plain-text table: header, ruler, one line per partition.
    pub fn render(rows: &[PartitionRow]) -> String {
        let body: Vec<[String; 6]> = rows.iter()
            .map(cells)
            .collect();
        let mut widths = HEADERS.map(str::len);
        for line in &body {
            for (w, c) in widths.iter_mut().zip(line) {
                *w = (*w).max(c.len());
            }
        }
        let fmt_line = |line: &[String]| {
            line.iter()
                .zip(widths)
                .map(|(c, w)| format!("{c:<w$}"))
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut res = vec![
            fmt_line(&HEADERS.map(String::from)[..]),
            widths.iter()
                .map(|w| "-".repeat(*w))
                .join("-+-"),
        ];
        res.extend(body.iter().map(|l| fmt_line(&l[..])));

        res.join("\n")
    }

    pub fn summary(st: &FragStats) -> String {
        [
            format!("Total memory:\t\t{}", fmt_units(st.total_memory)),
            format!("Partitioned:\t\t{}", fmt_units(st.partitioned)),
            format!("Used:\t\t\t{}", fmt_units(st.used)),
            format!("Internal frag.:\t\t{}", fmt_units(st.internal_fragmentation)),
            format!("External frag.:\t\t{}", fmt_units(st.external_fragmentation)),
            format!("Unplaced:\t\t{} ({} units)", st.unplaced, fmt_units(st.unplaced_demand)),
            format!("Rejected candidates:\t{}", st.rejected_candidates),
            format!("Utilization:\t\t{:.2}%", st.utilization * 100.0),
        ].join("\n")
    }
}

pub mod plot {
    use super::*;
    use plotters::prelude::*;
    use std::path::Path;
    use log::info;

    /// Width of one bar; three of them sit side by side, centered on
    /// their block's integer x position.
    pub const BAR_WIDTH: f64 = 0.25;

    /// One colored group of bars, one bar per partition.
    pub struct BarSeries {
        pub label:  &'static str,
        pub color:  RGBColor,
        /// Opposite corners of each bar, in chart coordinates.
        pub bars:   Vec<[(f64, f64); 2]>,
    }

    pub fn create_series(rows: &[PartitionRow]) -> Vec<BarSeries> {
        let metrics: [(&'static str, RGBColor, fn(&PartitionRow) -> MemUnits); 3] = [
            ("Space Required",  GREEN,  |r| r.space_required),
            ("Block Size",      BLUE,   |r| r.block_size),
            ("Unused Space",    RED,    |r| r.unused_space),
        ];

        metrics.into_iter()
            .enumerate()
            .map(|(slot, (label, color, value))| {
                let bars = rows.iter()
                    .enumerate()
                    .map(|(k, r)| {
                        let left = k as f64 - 1.5 * BAR_WIDTH + slot as f64 * BAR_WIDTH;
                        [(left, value(r)), (left + BAR_WIDTH, 0.0)]
                    })
                    .collect();
                BarSeries { label, color, bars }
            })
            .collect()
    }

    fn draw_err<E: std::fmt::Display>(e: E) -> ViewError {
        ViewError::Draw(e.to_string())
    }

    /// Draws the grouped bar chart of `rows` into a PNG at `img`.
    pub fn plot_partitions(rows: &[PartitionRow], img: &Path) -> Result<(), ViewError> {
        let n = rows.len().max(1);
        let y_max = rows.iter()
            .map(|r| r.block_size.max(r.space_required))
            .fold(1.0, MemUnits::max) * 1.1;

        let backend = BitMapBackend::new(img, (1280, 720)).into_drawing_area();
        backend.fill(&WHITE).map_err(draw_err)?;
        let backend = backend.margin(10u32, 10u32, 10u32, 10u32);

        let mut chart = ChartBuilder::on(&backend)
                            .caption("Memory Partition Information", ("sans-serif", 24))
                            .x_label_area_size(40u32)
                            .y_label_area_size(60u32)
                            .build_cartesian_2d(-0.5f64..n as f64 - 0.5, 0f64..y_max)
                            .map_err(draw_err)?;

        let name_at = |x: &f64| {
            let k = x.round();
            if (x - k).abs() < 1e-6 && k >= 0.0 && (k as usize) < rows.len() {
                rows[k as usize].name.clone()
            } else { String::new() }
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&name_at)
            .x_desc("Block Names")
            .y_desc("Size")
            .draw()
            .map_err(draw_err)?;

        for series in create_series(rows) {
            let color = series.color;
            chart
                .draw_series(series.bars.into_iter().map(|b| Rectangle::new(b, color.filled())))
                .map_err(draw_err)?
                .label(series.label)
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(draw_err)?;
        backend.present().map_err(draw_err)?;
        info!("Chart of {} partitions written to {}", rows.len(), img.display());

        Ok(())
    }
}
