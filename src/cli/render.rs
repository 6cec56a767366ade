// Terminal rendering helpers

use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::catalog::CatalogStore;
use crate::gateway::AnalysisReport;
use crate::selection::SelectionState;

/// Render the catalog as an indented tree with reboot markers.
pub fn print_catalog(catalog: &CatalogStore, selection: Option<&SelectionState>) {
    for root in catalog.roots() {
        print_subtree(catalog, selection, root, 0);
    }
}

fn print_subtree(
    catalog: &CatalogStore,
    selection: Option<&SelectionState>,
    id: &str,
    depth: usize,
) {
    let node = match catalog.get(id) {
        Some(node) => node,
        None => return,
    };

    let indent = "  ".repeat(depth);
    let marker = match selection {
        Some(state) if state.is_selected(id) => "[x]".green().to_string(),
        Some(_) => "[ ]".to_string(),
        None => String::new(),
    };
    let reboot = if catalog.requires_reboot(id) {
        " (reboot)".yellow().to_string()
    } else {
        String::new()
    };
    let improved = if catalog.is_improved(id) {
        " *improved".cyan().to_string()
    } else {
        String::new()
    };

    println!(
        "{indent}{marker} {id:<14} {label}{reboot}{improved}",
        id = node.id.clone().bold(),
        label = node.label,
    );
    if !node.description.is_empty() {
        println!("{indent}    {}", node.description.clone().dim());
    }

    for child in &node.children {
        print_subtree(catalog, selection, child, depth + 1);
    }
}

/// Progress bar for a generation run with `total` steps.
pub fn generation_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("{bar:36.green} {pos}/{len} {msg}")
            .expect("static progress template is valid"),
    );
    bar
}

pub fn print_analysis(report: &AnalysisReport) {
    let score = report.security_score;
    let rendered = format!("Security score: {score:.0}/100");
    let rendered = if score >= 75.0 {
        rendered.green().to_string()
    } else if score >= 40.0 {
        rendered.yellow().to_string()
    } else {
        rendered.red().to_string()
    };
    println!("{rendered}\n");
    println!("{}", report.analysis_text);
}
