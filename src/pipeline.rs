/* Load -> filter -> report -> save, once per cleaning command */

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Error, Result};
use indicatif::ProgressBar;
use log::{info, warn};
use mj_io::build_pbar;
use serde_json::Value;

use crate::config::LanguageSettings;
use crate::filters::{LanguageFilter, ObjectTitleFilter, ProblemFilter, RemovalReason, Verdict};
use crate::io::{load_records, write_records};
use crate::utils::display_title;

const SHOWN_REMOVED_TITLES: usize = 10;

/*================================================================================
=                            FILTER REPORT                                       =
================================================================================*/

#[derive(Debug, Default)]
pub struct FilterReport {
    pub total: usize,
    pub kept: Vec<Value>,
    pub removed: BTreeMap<RemovalReason, usize>,
    pub removed_titles: Vec<String>,
    pub errors: usize,
    pub log_lines: Vec<String>,
}

impl FilterReport {
    pub fn removed_for(&self, reason: RemovalReason) -> usize {
        self.removed.get(&reason).copied().unwrap_or(0)
    }

    pub fn removed_total(&self) -> usize {
        self.removed.values().sum()
    }

    pub fn language_summary(&self) -> Vec<String> {
        vec![
            String::from("Processing complete."),
            format!("Original number of problems: {}", self.total),
            format!("Number of problems removed due to '(reverse)' descriptions: {}", self.removed_for(RemovalReason::Reverse)),
            format!("Number of problems removed due to non-target-language content: {}", self.removed_for(RemovalReason::Language)),
            format!("Number of problems skipped due to errors or invalid format: {}", self.errors),
            format!("Number of problems remaining: {}", self.kept.len()),
        ]
    }

    pub fn object_title_summary(&self) -> Vec<String> {
        let mut lines = vec![
            String::from("Filter process complete."),
            format!("Original number of problems: {}", self.total),
            format!("Number of problems removed: {}", self.removed_total()),
            format!("Number of problems remaining: {}", self.kept.len()),
        ];
        if !self.removed_titles.is_empty() {
            lines.push(format!("Titles of removed problems (first {} shown if many):", SHOWN_REMOVED_TITLES));
            for title in self.removed_titles.iter().take(SHOWN_REMOVED_TITLES) {
                lines.push(format!("  - {}", title));
            }
            if self.removed_titles.len() > SHOWN_REMOVED_TITLES {
                lines.push(format!("  ... and {} more.", self.removed_titles.len() - SHOWN_REMOVED_TITLES));
            }
        }
        lines
    }
}


/// Classifies every record in input order. Kept records are moved into the report unchanged.
pub fn run_filter<F: ProblemFilter>(filter: &F, records: Vec<Value>, pbar: Option<&ProgressBar>) -> FilterReport {
    let mut report = FilterReport { total: records.len(), ..Default::default() };

    for (i, record) in records.into_iter().enumerate() {
        match filter.classify(i, &record, &mut report.log_lines) {
            Verdict::Keep => report.kept.push(record),
            Verdict::Remove(reason) => {
                *report.removed.entry(reason).or_insert(0) += 1;
                report.removed_titles.push(display_title(&record));
            }
            Verdict::Error(msg) => {
                report.errors += 1;
                report.log_lines.push(msg);
            }
        }
        if let Some(pbar) = pbar {
            pbar.inc(1);
        }
    }
    report
}


/*================================================================================
=                            COMMANDS                                            =
================================================================================*/

pub fn clean_language(input_file: &PathBuf, output_file: &PathBuf, settings: &LanguageSettings) -> Result<FilterReport, Error> {
    info!("Language settings: {}", serde_json::to_string(settings)?);
    let filter = LanguageFilter::from_settings(settings)?;

    println!("Reading data from {:?}...", input_file);
    let records = load_records(input_file)?;
    println!("Starting processing of {} problems...", records.len());

    let pbar = build_pbar(records.len(), "Problems");
    let report = run_filter(&filter, records, Some(&pbar));
    pbar.finish_and_clear();

    report.log_lines.iter().for_each(|line| warn!("{}", line));
    println!();
    report.language_summary().iter().for_each(|line| println!("{}", line));

    write_records(&report.kept, output_file, settings.escape_ascii)?;
    println!("\nSuccessfully saved cleaned problems to {:?}", output_file);
    Ok(report)
}


pub fn filter_object_titles(input_file: &PathBuf, output_file: &PathBuf, escape_ascii: bool) -> Result<FilterReport, Error> {
    println!("Reading data from {:?}...", input_file);
    let records = load_records(input_file)?;

    println!("Filtering problems...");
    let report = run_filter(&ObjectTitleFilter, records, None);

    println!();
    report.object_title_summary().iter().for_each(|line| println!("{}", line));

    write_records(&report.kept, output_file, escape_ascii)?;
    println!("\nFiltered data has been written to {:?}.", output_file);
    println!(
        "IMPORTANT: Please carefully review {:?} before replacing your original {:?}.",
        output_file, input_file
    );
    Ok(report)
}
