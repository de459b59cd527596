use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use csv::StringRecord;

/// Accepted header spellings per logical field, most preferred first.
pub const NAME_HEADERS: &[&str] = &["Cluster", "Cluster Name"];
pub const URL_HEADERS: &[&str] = &["URL", "Cluster URL"];

/// A row with both required fields present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterInput {
    pub name: String,
    pub url: String,
}

/// One data row after header resolution. `line` is the file line the
/// record starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterRow {
    pub line: u64,
    pub name: Option<String>,
    pub url: Option<String>,
}

impl ClusterRow {
    pub fn into_input(self) -> Option<ClusterInput> {
        Some(ClusterInput {
            name: self.name?,
            url: self.url?,
        })
    }
}

#[derive(Debug)]
pub struct ClusterTable {
    pub headers: Vec<String>,
    pub rows: Vec<ClusterRow>,
}

/// Column indexes that may hold one logical field, in lookup order.
struct ColumnLookup {
    columns: Vec<usize>,
}

impl ColumnLookup {
    fn new(headers: &StringRecord, candidates: &[&str]) -> Self {
        let columns = candidates
            .iter()
            .filter_map(|name| headers.iter().position(|h| h == *name))
            .collect();
        ColumnLookup { columns }
    }

    /// First candidate cell that exists and is non-empty.
    fn resolve(&self, record: &StringRecord) -> Option<String> {
        self.columns
            .iter()
            .filter_map(|&i| record.get(i))
            .find(|v| !v.is_empty())
            .map(String::from)
    }
}

pub fn read_clusters(path: &Path) -> Result<ClusterTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open input file {:?}", path))?;
    read_clusters_from(file).with_context(|| format!("Failed to read input file {:?}", path))
}

pub fn read_clusters_from<R: io::Read>(source: R) -> Result<ClusterTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);

    let header_record = reader.headers()?.clone();
    let name_col = ColumnLookup::new(&header_record, NAME_HEADERS);
    let url_col = ColumnLookup::new(&header_record, URL_HEADERS);

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(i as u64 + 2);
        rows.push(ClusterRow {
            line,
            name: name_col.resolve(&record),
            url: url_col.resolve(&record),
        });
    }

    Ok(ClusterTable {
        headers: header_record.iter().map(String::from).collect(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> ClusterTable {
        read_clusters_from(text.as_bytes()).unwrap()
    }

    fn pairs(table: &ClusterTable) -> Vec<(Option<&str>, Option<&str>)> {
        table
            .rows
            .iter()
            .map(|r| (r.name.as_deref(), r.url.as_deref()))
            .collect()
    }

    #[test]
    fn short_headers() {
        let t = read("Cluster,URL\nC1,http://x/ok\nC2,http://x/missing\n");
        assert_eq!(t.headers, vec!["Cluster", "URL"]);
        assert_eq!(
            pairs(&t),
            vec![
                (Some("C1"), Some("http://x/ok")),
                (Some("C2"), Some("http://x/missing")),
            ]
        );
    }

    #[test]
    fn long_headers() {
        let t = read("Cluster URL,Notes,Cluster Name\nhttp://x/a,skip me,Alpha\n");
        assert_eq!(pairs(&t), vec![(Some("Alpha"), Some("http://x/a"))]);
    }

    #[test]
    fn empty_short_column_falls_back_to_long() {
        let t = read("Cluster,Cluster Name,URL,Cluster URL\n,Beta,http://x/b,http://y/b\nGamma,G,,http://y/g\n");
        assert_eq!(
            pairs(&t),
            vec![
                (Some("Beta"), Some("http://x/b")),
                (Some("Gamma"), Some("http://y/g")),
            ]
        );
    }

    #[test]
    fn missing_fields_stay_unresolved() {
        let t = read("Cluster,URL\n,http://x/a\nOnlyName\nC3,\n");
        assert_eq!(
            pairs(&t),
            vec![
                (None, Some("http://x/a")),
                (Some("OnlyName"), None),
                (Some("C3"), None),
            ]
        );
        assert!(t.rows.into_iter().all(|r| r.into_input().is_none()));
    }

    #[test]
    fn unknown_headers_resolve_nothing() {
        let t = read("Name,Link\nA,http://x/a\n");
        assert_eq!(pairs(&t), vec![(None, None)]);
    }

    #[test]
    fn quoted_unicode_cells_and_blank_lines() {
        let t = read("Cluster,URL\n\"Caf\u{00E9}, \"\"beta\"\"\",http://x/c\n\nZ\u{00FC}rich,http://x/z\n");
        assert_eq!(
            pairs(&t),
            vec![
                (Some("Caf\u{00E9}, \"beta\""), Some("http://x/c")),
                (Some("Z\u{00FC}rich"), Some("http://x/z")),
            ]
        );
        assert_eq!(t.rows[0].line, 2);
    }

    #[test]
    fn into_input_requires_both() {
        let row = ClusterRow {
            line: 2,
            name: Some("C1".into()),
            url: Some("http://x/ok".into()),
        };
        assert_eq!(
            row.into_input(),
            Some(ClusterInput {
                name: "C1".into(),
                url: "http://x/ok".into()
            })
        );
    }

    #[test]
    fn missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_clusters(&dir.path().join("nope.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open input file"));
    }
}
