use crate::aggregator::AggregatedRecord;
use crate::error::QtspResult;
use crate::sampler::RunReport;
use crate::tour::{key_to_binary, SEGMENT_COUNT};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ReportFormat {
    Table,
    Json,
    Csv,
}

pub const SEPARATOR: &str = "-----------------";

pub fn render(report: &RunReport, format: ReportFormat) -> QtspResult<String> {
    match format {
        ReportFormat::Table => Ok(render_text(report)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)? + "\n"),
        ReportFormat::Csv => {
            let mut buf = Vec::new();
            write_records_csv(&mut buf, &report.records)?;
            Ok(String::from_utf8_lossy(&buf).into_owned())
        }
    }
}

/// Summary lines followed by the frequency table.
pub fn render_text(report: &RunReport) -> String {
    let mut out = String::new();

    if report.cancelled {
        let _ = writeln!(
            out,
            "stopped early: {} of {} trials",
            report.trial_count, report.requested_trials
        );
    }
    let _ = writeln!(out, "simulation complete.");

    for line in summary_lines(report) {
        let _ = writeln!(out, "{}", line);
    }

    let _ = writeln!(out, "{}", SEPARATOR);
    let _ = writeln!(out, "data from {} runs", report.trial_count);
    let _ = writeln!(out, "{}", records_table(&report.records));
    out
}

pub fn summary_lines(report: &RunReport) -> Vec<String> {
    let mut lines = Vec::new();
    match &report.best_valid {
        Some(best) => {
            lines.push(format!(
                "best cycle: {}, cost = {}",
                best.cycle(),
                best.cost
            ));
            let rate = report.best_hit_rate().unwrap_or(0.0) * 100.0;
            lines.push(format!(
                "{} runs found the best result ({:.1}%)",
                best.count, rate
            ));
        }
        None => lines.push("no valid cycle was found".to_string()),
    }

    if let Some(opt) = &report.exact_optimum {
        let verdict = if report.found_optimum() { "yes" } else { "no" };
        lines.push(format!(
            "optimal: {} (exhaustive optimum {}, cost = {})",
            verdict,
            key_to_binary(opt.key, SEGMENT_COUNT),
            opt.cost
        ));
    }
    lines
}

pub fn records_table(records: &[AggregatedRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Cycle").add_attribute(Attribute::Bold),
        Cell::new("Count"),
        Cell::new("Cost"),
        Cell::new("Valid"),
    ]);

    for i in 1..=2 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for r in records {
        let color = if r.valid { Color::Green } else { Color::Red };
        table.add_row(vec![
            Cell::new(r.cycle()).fg(color),
            Cell::new(r.count),
            Cell::new(r.cost),
            Cell::new(if r.valid { "yes" } else { "no" }).fg(color),
        ]);
    }
    table
}

#[derive(Serialize)]
struct CsvRow {
    key: u32,
    cycle: String,
    count: usize,
    cost: f64,
    valid: bool,
}

pub fn write_records_csv<W: Write>(writer: W, records: &[AggregatedRecord]) -> QtspResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for r in records {
        wtr.serialize(CsvRow {
            key: r.key,
            cycle: r.cycle(),
            count: r.count,
            cost: r.cost,
            valid: r.valid,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
