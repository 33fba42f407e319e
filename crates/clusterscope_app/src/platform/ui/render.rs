use std::fmt::Write;

use chrono::{DateTime, Local};
use clusterscope_core::{AppViewModel, ClusterView, FileRowView, MethodOptionView, ResultsView};

const TEXT_PREVIEW_CHARS: usize = 60;

/// Extra status the core does not track.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub last_completed: Option<DateTime<Local>>,
}

pub fn render(view: &AppViewModel, status: &StatusLine) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "-- Upload{} --", if view.drag_over { " (drop here)" } else { "" });
    let _ = writeln!(out, "{}", view.upload_prompt);
    if view.file_list_visible {
        for (index, row) in view.files.iter().enumerate() {
            let _ = writeln!(out, "{}", format_file_row(index + 1, row));
        }
    }

    let _ = writeln!(out, "-- Text --");
    let _ = writeln!(out, "{}", text_preview(&view.text));

    let _ = writeln!(out, "-- Clustering method --");
    let options: Vec<_> = view.methods.iter().map(format_method_option).collect();
    let _ = writeln!(out, "{}", options.join("   "));

    if view.busy {
        let _ = writeln!(out, "[ Analyzing... ]");
    } else if view.analyze_enabled {
        let _ = writeln!(out, "[ Analyze ]");
    }

    if let Some(results) = &view.results {
        render_results(&mut out, results);
    }

    if let Some(at) = status.last_completed {
        let _ = writeln!(out, "Last analysis: {}", at.format("%H:%M:%S"));
    }

    out
}

fn render_results(out: &mut String, results: &ResultsView) {
    let _ = writeln!(out, "== {} ==", results.heading);
    if results.clusters.is_empty() {
        let _ = writeln!(out, "(no clusters)");
        return;
    }
    for cluster in &results.clusters {
        render_cluster(out, cluster);
    }
    let _ = writeln!(
        out,
        "Download all: `download-all` -> {}",
        results.download_all_filename
    );
}

fn render_cluster(out: &mut String, cluster: &ClusterView) {
    let _ = writeln!(out, "{}", cluster.heading);
    for (index, sentence) in cluster.sentences.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, sentence);
    }
    let _ = writeln!(
        out,
        "  Download: `download {}` -> {}",
        cluster.cluster_id, cluster.download_filename
    );
}

fn format_file_row(row_number: usize, row: &FileRowView) -> String {
    format!(
        "  {row_number}. [{icon}] {name} ({size})",
        icon = row.icon.label(),
        name = row.name,
        size = row.size_label
    )
}

fn format_method_option(option: &MethodOptionView) -> String {
    let mark = if option.selected { 'x' } else { ' ' };
    format!("({mark}) {} - {}", option.method.as_str(), option.method.label())
}

fn text_preview(text: &str) -> String {
    if text.trim().is_empty() {
        return "(empty)".to_string();
    }
    let first_line = text.lines().find(|line| !line.trim().is_empty()).unwrap_or("");
    let mut preview: String = first_line.chars().take(TEXT_PREVIEW_CHARS).collect();
    if first_line.chars().count() > TEXT_PREVIEW_CHARS || text.lines().count() > 1 {
        preview.push_str("...");
    }
    format!("{preview} ({} chars)", text.chars().count())
}
