use anyhow::Result;

use crate::border::Border;
use crate::classifier::ScanResult;
use crate::config::EffectiveConfig;
use crate::highlight::Highlighter;
use crate::model::{Candidate, DeletionSet, OutputFormat, RemoveSummary};

const HEADERS: [&str; 5] = ["file", "min X", "max X", "min Z", "max Z"];

pub fn print_scan(result: &ScanResult, cfg: &EffectiveConfig) -> Result<()> {
    match cfg.format {
        OutputFormat::Ai => print_ai_scan(&result.candidates),
        OutputFormat::Human => {
            let hl = cfg.color.highlighter();
            print!("{}", render_report(result, &cfg.border, hl.as_ref()));
            Ok(())
        }
    }
}

pub fn print_remove_summary(summary: &RemoveSummary, cfg: &EffectiveConfig) -> Result<()> {
    if matches!(cfg.format, OutputFormat::Ai) {
        let line = serde_json::json!({
            "planned": summary.planned,
            "removed": summary.removed,
            "already_absent": summary.already_absent,
            "failed": summary.failed.len(),
        });
        println!("{}", serde_json::to_string(&line)?);
        return Ok(());
    }

    let hl = cfg.color.highlighter();
    for (path, reason) in &summary.failed {
        eprintln!("{} {}: {}", hl.out_of_range("failed"), path.display(), reason);
    }
    print!("{}", render_remove_summary(summary, hl.as_ref()));
    Ok(())
}

pub fn print_cancelled(cfg: &EffectiveConfig) {
    if matches!(cfg.format, OutputFormat::Human) {
        println!("Operation cancelled.");
    }
}

fn print_ai_scan(set: &DeletionSet) -> Result<()> {
    for c in set {
        println!("{}", serde_json::to_string(&ai_line(c))?);
    }
    Ok(())
}

fn ai_line(c: &Candidate) -> serde_json::Value {
    serde_json::json!({
        "f": c.path.to_string_lossy(),
        "g": c.granularity.short_tag(),
        "x": [c.bounds.min_x, c.bounds.max_x],
        "z": [c.bounds.min_z, c.bounds.max_z],
    })
}

pub fn render_report(result: &ScanResult, border: &Border, hl: &dyn Highlighter) -> String {
    let b = border.bounds();
    let mut out = format!(
        "{} X [{}, {}], Z [{}, {}]\n",
        hl.heading("World border"),
        b.min_x,
        b.max_x,
        b.min_z,
        b.max_z
    );

    if result.candidates.is_empty() {
        out.push_str("No file to delete.\n");
        return out;
    }

    out.push_str("\nFiles to delete:\n");
    out.push_str(&render_table(&result.candidates, border, hl));
    out.push_str(&format!(
        "\n{} to_delete={} kept={}\n",
        hl.heading("Summary"),
        result.candidates.len(),
        result.kept()
    ));
    out
}

/// Aligned table of candidates; bounds outside the border go through `hl`.
///
/// Column widths are measured on the undecorated text so escape sequences do
/// not skew alignment.
pub fn render_table(set: &DeletionSet, border: &Border, hl: &dyn Highlighter) -> String {
    let b = border.bounds();
    let rows: Vec<(String, [(String, bool); 4])> = set
        .iter()
        .map(|c| {
            let r = c.bounds;
            (
                c.path.display().to_string(),
                [
                    (r.min_x.to_string(), b.x_out_of_range(r.min_x)),
                    (r.max_x.to_string(), b.x_out_of_range(r.max_x)),
                    (r.min_z.to_string(), b.z_out_of_range(r.min_z)),
                    (r.max_z.to_string(), b.z_out_of_range(r.max_z)),
                ],
            )
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for (file, cells) in &rows {
        widths[0] = widths[0].max(file.chars().count());
        for (i, (text, _)) in cells.iter().enumerate() {
            widths[i + 1] = widths[i + 1].max(text.len());
        }
    }

    let mut out = String::new();
    out.push_str(&format!("| {:<w$} |", HEADERS[0], w = widths[0]));
    for (h, w) in HEADERS.iter().zip(widths).skip(1) {
        out.push_str(&format!(" {h:>w$} |"));
    }
    out.push('\n');
    for w in widths {
        out.push('|');
        out.push_str(&"-".repeat(w + 2));
    }
    out.push_str("|\n");

    for (file, cells) in &rows {
        out.push_str(&format!("| {:<w$} |", file, w = widths[0]));
        for ((text, outside), w) in cells.iter().zip(&widths[1..]) {
            let pad = " ".repeat(w - text.len());
            let text = if *outside {
                hl.out_of_range(text)
            } else {
                text.clone()
            };
            out.push_str(&format!(" {pad}{text} |"));
        }
        out.push('\n');
    }
    out
}

pub fn render_remove_summary(summary: &RemoveSummary, hl: &dyn Highlighter) -> String {
    let mut out = format!(
        "\nFinished. {} files deleted.\n",
        summary.removed + summary.already_absent
    );
    if summary.already_absent > 0 || !summary.is_clean() {
        out.push_str(&format!(
            "{} planned={} removed={} already_absent={} failed={}\n",
            hl.heading("Remove summary"),
            summary.planned,
            summary.removed,
            summary.already_absent,
            summary.failed.len()
        ));
    }
    out
}
