// ABOUTME: Report writers for the competitor analysis: per-page files plus CSV and XLSX summaries.
// ABOUTME: Existing files in the output directory are overwritten.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;
use seokit_pages::PageRecord;
use seokit_text::{ScoredTerm, ScoringMethod};

use crate::analysis::Analysis;

pub const CSV_FILE: &str = "competitor_ngrams.csv";
pub const XLSX_FILE: &str = "competitor_ngrams.xlsx";
/// N-grams shown per page in the summary table and the text report.
pub const REPORT_TERMS: usize = 20;

/// One summary cell. Counts stay numeric in the spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Count(usize),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Count(n) => write!(f, "{}", n),
        }
    }
}

/// The aggregate table written to CSV and XLSX.
#[derive(Debug, Clone)]
pub struct SummaryTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

fn term_cell(term: &ScoredTerm) -> String {
    format!("{} ({:.4})", term.term, term.score)
}

/// `[["term", weight], ...]` with a space after every comma.
/// Frequency weights are whole counts and are written as integers.
fn heading_json(terms: &[ScoredTerm], method: Option<ScoringMethod>) -> String {
    let pairs: Vec<String> = terms
        .iter()
        .map(|t| {
            let term = serde_json::to_string(&t.term).unwrap_or_else(|_| "\"\"".to_string());
            let weight = match method {
                Some(ScoringMethod::Frequency) => format!("{}", t.score as u64),
                _ => serde_json::to_string(&t.score).unwrap_or_else(|_| "0.0".to_string()),
            };
            format!("[{}, {}]", term, weight)
        })
        .collect();
    format!("[{}]", pairs.join(", "))
}

/// Build the summary: `url, domain, text_len, headings_count, ngram_1..ngram_N, head_top`.
///
/// N is the widest page's term count (at most [`REPORT_TERMS`]); shorter rows
/// get blank cells.
pub fn summary_table(analysis: &Analysis) -> SummaryTable {
    let width = analysis
        .page_terms
        .iter()
        .map(|terms| terms.len().min(REPORT_TERMS))
        .max()
        .unwrap_or(0);

    let mut headers: Vec<String> = ["url", "domain", "text_len", "headings_count"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    headers.extend((1..=width).map(|j| format!("ngram_{}", j)));
    headers.push("head_top".to_string());

    let rows = analysis
        .pages
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let terms = analysis.page_terms.get(i).map(Vec::as_slice).unwrap_or(&[]);
            let heads = analysis.heading_terms.get(i).map(Vec::as_slice).unwrap_or(&[]);

            let mut row = vec![
                Cell::Text(page.url.clone()),
                Cell::Text(page.domain.clone()),
                Cell::Count(page.text_len()),
                Cell::Count(page.headings.len()),
            ];
            row.extend((0..width).map(|j| {
                Cell::Text(terms.get(j).map(term_cell).unwrap_or_default())
            }));
            row.push(Cell::Text(heading_json(heads, analysis.heading_method)));
            row
        })
        .collect();

    SummaryTable { headers, rows }
}

/// Plain-text report for one page.
pub fn page_report(page: &PageRecord, terms: &[ScoredTerm], method: ScoringMethod) -> String {
    let mut lines = vec![
        format!("URL: {}", page.url),
        format!("Domain: {}", page.domain),
        format!("Text length: {}", page.text_len()),
        format!("Headings count: {}", page.headings.len()),
        String::new(),
        "Headings:".to_string(),
    ];
    for heading in &page.headings {
        lines.push(format!("  {}: {}", heading.tag().to_uppercase(), heading.text));
    }
    lines.push(String::new());
    lines.push(match method {
        ScoringMethod::TfIdf => "Top n-grams (TF-IDF):".to_string(),
        ScoringMethod::Frequency => "Top n-grams (frequency):".to_string(),
    });
    for term in terms.iter().take(REPORT_TERMS) {
        lines.push(format!("  {} - {:.4}", term.term, term.score));
    }
    lines.join("\n")
}

pub fn write_csv(path: &Path, table: &SummaryTable) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|c| c.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_xlsx(path: &Path, table: &SummaryTable) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in table.headers.iter().enumerate() {
        sheet.write_string(0, col as u16, header.as_str())?;
    }
    for (r, row) in table.rows.iter().enumerate() {
        let r = r as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(s) if s.is_empty() => {}
                Cell::Text(s) => {
                    sheet.write_string(r, col as u16, s.as_str())?;
                }
                Cell::Count(n) => {
                    sheet.write_number(r, col as u16, *n as f64)?;
                }
            }
        }
    }
    workbook
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Write every per-page file and both summaries into `outdir`. Returns the written paths.
pub fn write_analysis(outdir: &Path, analysis: &Analysis) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(outdir).with_context(|| format!("creating {}", outdir.display()))?;
    let mut written = Vec::new();

    for (i, page) in analysis.pages.iter().enumerate() {
        let n = i + 1;

        let html_path = outdir.join(format!("page_{}.html", n));
        fs::write(&html_path, &page.html)
            .with_context(|| format!("writing {}", html_path.display()))?;
        written.push(html_path);

        let headings_path = outdir.join(format!("page_{}_headings.json", n));
        fs::write(&headings_path, serde_json::to_string_pretty(&page.headings)?)
            .with_context(|| format!("writing {}", headings_path.display()))?;
        written.push(headings_path);

        let terms = analysis.page_terms.get(i).map(Vec::as_slice).unwrap_or(&[]);
        let report_path = outdir.join(format!("page_{}_report.txt", n));
        fs::write(&report_path, page_report(page, terms, analysis.method))
            .with_context(|| format!("writing {}", report_path.display()))?;
        written.push(report_path);
    }

    let table = summary_table(analysis);
    let csv_path = outdir.join(CSV_FILE);
    write_csv(&csv_path, &table)?;
    written.push(csv_path);

    let xlsx_path = outdir.join(XLSX_FILE);
    write_xlsx(&xlsx_path, &table)?;
    written.push(xlsx_path);

    Ok(written)
}
