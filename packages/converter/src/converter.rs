//! Conversion service: source title files to Akoma Ntoso documents.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::akn::{build_document, save_document};
use crate::config::{is_source_file_name, parse_title_number};
use crate::error::{error_chain, ConverterError, Result};
use crate::source::parse_source;

/// Result of converting one title file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleOutcome {
    /// A document was written.
    Written {
        /// Path of the output file.
        path: PathBuf,
        /// Number of sections in the document.
        sections: usize,
    },

    /// No sections were extracted; nothing was written.
    Empty,
}

/// Summary of a batch conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Titles converted and written.
    pub titles_processed: usize,

    /// Sections written across all documents.
    pub sections_converted: usize,

    /// Output files written.
    pub files_written: usize,

    /// Titles that failed and were skipped.
    pub titles_failed: usize,

    /// Directory the documents were written to.
    pub output_dir: PathBuf,
}

/// Progress notification sent before each title of a batch.
#[derive(Debug, Clone, Copy)]
pub struct BatchProgress<'a> {
    /// Zero-based position of the file in the batch.
    pub index: usize,

    /// Number of candidate files in the batch.
    pub total: usize,

    /// File about to be converted.
    pub file: &'a Path,
}

/// Convert a single title file into `output_dir`.
///
/// The title number is taken from the file name. Titles without any
/// extractable section produce [`TitleOutcome::Empty`] and no file.
pub fn convert_title(
    path: &Path,
    output_dir: &Path,
    generation_date: NaiveDate,
) -> Result<TitleOutcome> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let title = parse_title_number(&file_name)?;
    convert_numbered_title(path, title, output_dir, generation_date)
}

fn convert_numbered_title(
    path: &Path,
    title: u32,
    output_dir: &Path,
    generation_date: NaiveDate,
) -> Result<TitleOutcome> {
    let bytes = fs::read(path).map_err(|source| ConverterError::ReadSource {
        path: path.to_path_buf(),
        source,
    })?;
    let xml = String::from_utf8_lossy(&bytes);

    let sections = parse_source(&xml)?;
    if sections.is_empty() {
        tracing::info!(title, file = %path.display(), "No sections found, skipping title");
        return Ok(TitleOutcome::Empty);
    }

    let document = build_document(title, &sections, generation_date);
    let output = save_document(&document, output_dir, title)?;

    tracing::info!(
        title,
        sections = sections.len(),
        output = %output.display(),
        "Converted title"
    );

    Ok(TitleOutcome::Written {
        path: output,
        sections: sections.len(),
    })
}

/// Candidate source files in a directory, sorted by file name.
pub fn source_files(source_dir: &Path) -> Result<Vec<PathBuf>> {
    if !source_dir.is_dir() {
        return Err(ConverterError::SourceDirectory(source_dir.to_path_buf()));
    }

    let read_error = |source: std::io::Error| ConverterError::ReadSource {
        path: source_dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(source_dir).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        let name = entry.file_name();
        if is_source_file_name(&name.to_string_lossy()) && entry.path().is_file() {
            files.push(entry.path());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Convert every title file in `source_dir` into `output_dir`.
pub fn convert_directory(source_dir: &Path, output_dir: &Path) -> Result<BatchReport> {
    convert_directory_with(source_dir, output_dir, |_| {})
}

/// Convert every title file, reporting progress before each file.
///
/// Environment failures (missing source directory, output directory that
/// cannot be created) abort before any title is processed. A failing title
/// is logged with its cause chain and the batch continues.
pub fn convert_directory_with<F>(
    source_dir: &Path,
    output_dir: &Path,
    mut on_progress: F,
) -> Result<BatchReport>
where
    F: FnMut(BatchProgress<'_>),
{
    let files = source_files(source_dir)?;
    fs::create_dir_all(output_dir).map_err(|source| ConverterError::OutputDirectory {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let generation_date = chrono::Local::now().date_naive();
    let mut report = BatchReport {
        titles_processed: 0,
        sections_converted: 0,
        files_written: 0,
        titles_failed: 0,
        output_dir: output_dir.to_path_buf(),
    };

    let total = files.len();
    for (index, file) in files.iter().enumerate() {
        on_progress(BatchProgress { index, total, file });

        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let title = match parse_title_number(&file_name) {
            Ok(title) => title,
            Err(e) => {
                tracing::warn!(file = %file_name, "Skipping file: {e}");
                continue;
            }
        };

        match convert_numbered_title(file, title, output_dir, generation_date) {
            Ok(TitleOutcome::Written { sections, .. }) => {
                report.titles_processed += 1;
                report.files_written += 1;
                report.sections_converted += sections;
            }
            Ok(TitleOutcome::Empty) => {}
            Err(e) => {
                report.titles_failed += 1;
                tracing::error!(title, file = %file_name, "Title failed: {}", error_chain(&e));
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const TITLE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Title>
  <Index Level="3">
    <Caption>5-1-1</Caption>
    <Description>Short title</Description>
    <Content>&lt;P&gt;This title may be cited.&lt;/P&gt;</Content>
  </Index>
</Title>"#;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_convert_title_writes_document() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("gov.ga.ocga.2018.title.5.xml");
        fs::write(&source, TITLE_XML).unwrap();

        let outcome = convert_title(&source, dir.path(), date()).unwrap();
        let TitleOutcome::Written { path, sections } = outcome else {
            panic!("expected a written document");
        };
        assert_eq!(sections, 1);
        assert_eq!(path, dir.path().join("us-ga-title-05.akn.xml"));
        assert!(fs::read_to_string(path).unwrap().contains("sec_5-1-1"));
    }

    #[test]
    fn test_convert_title_empty() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("gov.ga.ocga.2018.title.6.xml");
        fs::write(&source, "<Title><Index Level=\"1\"><Caption>TITLE 6</Caption></Index></Title>")
            .unwrap();

        assert_eq!(
            convert_title(&source, dir.path(), date()).unwrap(),
            TitleOutcome::Empty
        );
        assert!(!dir.path().join("us-ga-title-06.akn.xml").exists());
    }

    #[test]
    fn test_convert_title_rejects_bad_name() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("gov.ga.ocga.2018.title.6b.xml");
        fs::write(&source, TITLE_XML).unwrap();

        assert!(matches!(
            convert_title(&source, dir.path(), date()),
            Err(ConverterError::InvalidSourceFileName(_))
        ));
    }

    #[test]
    fn test_source_files_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        for name in [
            "gov.ga.ocga.2018.title.2.xml",
            "gov.ga.ocga.2018.title.10.xml",
            "gov.ga.ocga.2018.title.1.xml",
            "readme.txt",
            "gov.ga.ocga.2018.title.3.json",
        ] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let names: Vec<_> = source_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "gov.ga.ocga.2018.title.1.xml",
                "gov.ga.ocga.2018.title.10.xml",
                "gov.ga.ocga.2018.title.2.xml",
            ]
        );
    }

    #[test]
    fn test_source_files_missing_dir() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            source_files(&dir.path().join("nope")),
            Err(ConverterError::SourceDirectory(_))
        ));
    }

    #[test]
    fn test_convert_directory_reports_progress() {
        let source = tempdir().unwrap();
        let output = tempdir().unwrap();
        fs::write(source.path().join("gov.ga.ocga.2018.title.5.xml"), TITLE_XML).unwrap();
        fs::write(source.path().join("gov.ga.ocga.2018.title.5a.xml"), TITLE_XML).unwrap();

        let mut seen = Vec::new();
        let report = convert_directory_with(source.path(), output.path(), |progress| {
            seen.push((progress.index, progress.total));
        })
        .unwrap();

        assert_eq!(seen, vec![(0, 2), (1, 2)]);
        assert_eq!(report.titles_processed, 1);
        assert_eq!(report.files_written, 1);
        assert_eq!(report.sections_converted, 1);
        assert_eq!(report.titles_failed, 0);
    }

    #[test]
    fn test_convert_directory_counts_only_written_titles() {
        let source = tempdir().unwrap();
        let output = tempdir().unwrap();
        fs::write(source.path().join("gov.ga.ocga.2018.title.1.xml"), "<Title/>").unwrap();
        fs::write(source.path().join("gov.ga.ocga.2018.title.2.xml"), "<Title>").unwrap();

        let report = convert_directory(source.path(), output.path()).unwrap();

        assert_eq!(report.titles_processed, 0);
        assert_eq!(report.files_written, 0);
        assert_eq!(report.sections_converted, 0);
        assert_eq!(report.titles_failed, 1);
    }
}
