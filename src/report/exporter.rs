use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::models::{ClassifiedItem, GeoSummaryRow, ReportPaths};

pub const RAW_ITEMS_FILE: &str = "raw_items.csv";
pub const SUMMARY_FILE: &str = "summary_by_geo.csv";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const RAW_HEADERS: [&str; 5] = ["name", "geo", "status", "is_learning", "is_waiting"];
const SUMMARY_HEADERS: [&str; 4] = ["geo", "learning_count", "waiting_count", "total_count"];

#[derive(Serialize)]
struct RawRow<'a> {
    name: &'a str,
    geo: &'a str,
    status: &'a str,
    is_learning: bool,
    is_waiting: bool,
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    geo: &'a str,
    learning_count: u64,
    waiting_count: u64,
    total_count: u64,
}

/// Writes the two report tables into one directory.
pub struct ReportExporter {
    output_dir: PathBuf,
}

impl ReportExporter {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn paths(&self) -> ReportPaths {
        ReportPaths {
            raw_items: self.output_dir.join(RAW_ITEMS_FILE),
            summary_by_geo: self.output_dir.join(SUMMARY_FILE),
        }
    }

    /// Both tables are staged in full before either replaces an existing
    /// file, so a failed export leaves the previous pair untouched.
    pub fn export(
        &self,
        items: &[ClassifiedItem],
        summary: &[GeoSummaryRow],
    ) -> Result<ReportPaths> {
        fs::create_dir_all(&self.output_dir)?;
        let paths = self.paths();

        let raw_file = self.stage(&RAW_HEADERS, items.iter().map(|item| RawRow {
            name: &item.name,
            geo: &item.geo,
            status: &item.status_text,
            is_learning: item.is_learning,
            is_waiting: item.is_waiting,
        }))?;

        let summary_file = self.stage(&SUMMARY_HEADERS, summary.iter().map(|row| SummaryRow {
            geo: &row.geo,
            learning_count: row.learning_count,
            waiting_count: row.waiting_count,
            total_count: row.total_count,
        }))?;

        persist(raw_file, &paths.raw_items)?;
        persist(summary_file, &paths.summary_by_geo)?;

        tracing::info!(
            "Report written: {} ({} rows), {} ({} rows)",
            paths.raw_items.display(),
            items.len(),
            paths.summary_by_geo.display(),
            summary.len()
        );

        Ok(paths)
    }

    fn stage<R, I>(&self, headers: &[&str], rows: I) -> Result<NamedTempFile>
    where
        R: Serialize,
        I: IntoIterator<Item = R>,
    {
        let mut file = NamedTempFile::new_in(&self.output_dir)?;
        file.write_all(UTF8_BOM)?;

        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(file.as_file_mut());

            writer.write_record(headers)?;
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }

        file.as_file().sync_all()?;
        Ok(file)
    }
}

fn persist(file: NamedTempFile, dest: &Path) -> Result<()> {
    file.persist(dest).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, geo: &str, status: &str, l: bool, w: bool) -> ClassifiedItem {
        ClassifiedItem {
            name: name.to_string(),
            geo: geo.to_string(),
            status_text: status.to_string(),
            is_learning: l,
            is_waiting: w,
        }
    }

    fn row(geo: &str, l: u64, w: u64) -> GeoSummaryRow {
        GeoSummaryRow {
            geo: geo.to_string(),
            learning_count: l,
            waiting_count: w,
            total_count: l + w,
            item_count: l + w,
        }
    }

    #[test]
    fn test_export_writes_bom_headers_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = ReportExporter::new(dir.path());

        let paths = exporter
            .export(
                &[item("Анна, \"A\"", "Европа", "Обучается", true, false)],
                &[row("Европа", 1, 0)],
            )
            .unwrap();

        let raw = fs::read(&paths.raw_items).unwrap();
        assert!(raw.starts_with(UTF8_BOM));
        let raw = String::from_utf8(raw[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(
            raw,
            "name,geo,status,is_learning,is_waiting\n\"Анна, \"\"A\"\"\",Европа,Обучается,true,false\n"
        );

        let summary = fs::read(&paths.summary_by_geo).unwrap();
        assert!(summary.starts_with(UTF8_BOM));
        let summary = String::from_utf8(summary[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(
            summary,
            "geo,learning_count,waiting_count,total_count\nЕвропа,1,0,1\n"
        );
    }

    #[test]
    fn test_empty_report_keeps_headers() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ReportExporter::new(dir.path()).export(&[], &[]).unwrap();

        let summary = fs::read(&paths.summary_by_geo).unwrap();
        assert_eq!(
            &summary[UTF8_BOM.len()..],
            b"geo,learning_count,waiting_count,total_count\n"
        );
        let raw = fs::read(&paths.raw_items).unwrap();
        assert_eq!(
            &raw[UTF8_BOM.len()..],
            b"name,geo,status,is_learning,is_waiting\n"
        );
    }

    #[test]
    fn test_export_replaces_previous_files_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = ReportExporter::new(dir.path());

        exporter
            .export(&[item("a", "EU", "x", false, false)], &[row("EU", 0, 0)])
            .unwrap();
        exporter.export(&[], &[]).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names.len(), 2);

        let summary = fs::read_to_string(exporter.paths().summary_by_geo).unwrap();
        assert_eq!(summary.lines().count(), 1);
    }

    #[test]
    fn test_export_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("reports").join("latest");
        let paths = ReportExporter::new(&nested).export(&[], &[]).unwrap();
        assert!(paths.raw_items.exists());
        assert!(paths.summary_by_geo.exists());
    }
}
