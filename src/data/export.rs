use std::path::Path;

use anyhow::{Context, Result};

use super::filter::FilteredView;
use crate::error::DashboardError;

/// Write the rows of `view` to `path` as CSV, keeping the source header order.
pub fn export_csv(view: &FilteredView<'_>, path: &Path) -> Result<(), DashboardError> {
    write_csv(view, path).map_err(|e| DashboardError::Export {
        path: path.to_path_buf(),
        reason: format!("{e:#}"),
    })
}

fn write_csv(view: &FilteredView<'_>, path: &Path) -> Result<()> {
    let headers = &view.table().headers;
    // Header is written by hand; rows are plain sequences.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .context("creating CSV file")?;
    writer.write_record(headers).context("writing CSV header")?;

    for (row_no, rec) in view.rows().enumerate() {
        let cells: Vec<_> = headers.iter().map(|h| rec.cell(h)).collect();
        writer
            .serialize(&cells)
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::data::filter::{FilterSelection, apply_filter};
    use crate::data::loader::load_file;
    use crate::data::model::fixtures::ten_workers;

    #[test]
    fn test_export_then_reload_filtered_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("it.csv");
        let table = ten_workers();
        let view = apply_filter(&table, &FilterSelection::new(["IT"]));

        export_csv(&view, &path).unwrap();
        let reloaded = load_file(&path).unwrap();

        assert_eq!(reloaded.headers, table.headers);
        assert_eq!(reloaded.len(), 4);
        assert!(reloaded.records.iter().all(|r| r.industry_sector == "IT"));
        assert_eq!(reloaded.records[1].age, 30);
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let table = ten_workers();
        let view = FilteredView::all(&table);
        let err = export_csv(&view, &dir.path().join("no/such/dir.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::Export { .. }));
    }
}
