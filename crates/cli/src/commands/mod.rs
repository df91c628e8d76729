// ABOUTME: Subcommand implementations for the seokit CLI.
// ABOUTME: Shared helpers for reading URL columns out of CSV files live here.

pub mod images;
pub mod ngrams;
pub mod redirects;
pub mod status;
pub mod tracking;

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use seokit_pages::find_url_column;

/// Non-empty values of the URL-like column of a CSV file.
pub fn read_url_column(path: &Path) -> Result<Vec<String>> {
    read_values(path, |headers| {
        find_url_column(headers).ok_or_else(|| {
            anyhow!(
                "no column named url, link or website in {} (found: {})",
                path.display(),
                headers.join(", ")
            )
        })
    })
}

/// Non-empty values of the column whose header is exactly `name`.
pub fn read_column(path: &Path, name: &str) -> Result<Vec<String>> {
    read_values(path, |headers| {
        headers.iter().position(|h| h.trim() == name).ok_or_else(|| {
            anyhow!(
                "no {} column in {} (found: {})",
                name,
                path.display(),
                headers.join(", ")
            )
        })
    })
}

fn read_values<F>(path: &Path, pick: F) -> Result<Vec<String>>
where
    F: FnOnce(&[String]) -> Result<usize>,
{
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("reading {}", path.display()))?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let column = pick(&headers)?;

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(value) = record.get(column) {
            let value = value.trim();
            if !value.is_empty() {
                values.push(value.to_string());
            }
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_url_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "Title,Link\nA,https://a.example/\nB,\nC, https://c.example/ \n").unwrap();
        assert_eq!(
            read_url_column(&path).unwrap(),
            vec!["https://a.example/", "https://c.example/"]
        );
    }

    #[test]
    fn test_read_url_column_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "Title,Address\nA,x\n").unwrap();
        let err = read_url_column(&path).unwrap_err();
        assert!(err.to_string().contains("no column named url"));
    }

    #[test]
    fn test_read_column_is_exact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("404.csv");
        fs::write(
            &path,
            "Page,URL\nTrail guide,https://example.com/blog/trail-shoe-guide\n",
        )
        .unwrap();
        assert_eq!(
            read_column(&path, "URL").unwrap(),
            vec!["https://example.com/blog/trail-shoe-guide"]
        );

        fs::write(&path, "Page,url\nTrail guide,https://example.com/\n").unwrap();
        let err = read_column(&path, "URL").unwrap_err();
        assert!(err.to_string().contains("no URL column"));
    }
}
