//! Writing exported tender files

use std::path::{Path, PathBuf};

use super::args::ExportFormat;
use crate::errors::Result;
use crate::types::{export_file_stem, TenderDocument};

/// Write the requested exports into `dir`, returning the paths written
pub fn write_exports(
    document: &TenderDocument,
    title: &str,
    dir: &Path,
    format: ExportFormat,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let stem = export_file_stem(title);
    let mut written = Vec::new();

    if format.writes_text() {
        let path = dir.join(format!("{}.txt", stem));
        std::fs::write(&path, document.to_text())?;
        written.push(path);
    }

    if format.writes_json() {
        let path = dir.join(format!("{}.json", stem));
        std::fs::write(&path, document.to_json()?)?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Section;
    use tempfile::TempDir;

    fn document() -> TenderDocument {
        TenderDocument::from_entries(Section::ALL.iter().map(|s| (*s, format!("{} body", s)))).unwrap()
    }

    #[test]
    fn test_write_both_formats() {
        let dir = TempDir::new().unwrap();
        let written = write_exports(&document(), "Road Upgrade", dir.path(), ExportFormat::Both).unwrap();

        assert_eq!(
            written,
            vec![
                dir.path().join("tender_road_upgrade.txt"),
                dir.path().join("tender_road_upgrade.json"),
            ]
        );

        let text = std::fs::read_to_string(&written[0]).unwrap();
        assert!(text.starts_with("# NOTICE INVITING TENDER\n\n"));

        let json = std::fs::read_to_string(&written[1]).unwrap();
        assert_eq!(TenderDocument::from_json(&json).unwrap(), document());
    }

    #[test]
    fn test_write_single_format_creates_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("exports");
        let written = write_exports(&document(), "Bridge", &out, ExportFormat::Json).unwrap();
        assert_eq!(written, vec![out.join("tender_bridge.json")]);
        assert!(!out.join("tender_bridge.txt").exists());
    }
}
