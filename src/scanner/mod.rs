//! BOM folder scanning and file selection

use crate::error::{LcrError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomFile {
    pub path: PathBuf,
    pub file_name: String,
}

const BOM_EXTENSION: &str = "xlsx";

fn is_bom_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(BOM_EXTENSION))
        .unwrap_or(false)
}

/// List the Excel files directly inside `folder`, sorted by file name
pub fn scan_folder(folder: &Path) -> Result<Vec<BomFile>> {
    if !folder.is_dir() {
        return Err(LcrError::FolderNotFound(folder.display().to_string()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() || !is_bom_file(path) {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        files.push(BomFile {
            path: path.to_path_buf(),
            file_name,
        });
    }

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    tracing::debug!(folder = %folder.display(), count = files.len(), "bom folder scanned");

    Ok(files)
}

/// Pick files by name, keeping folder order. No names selects everything.
pub fn select_files(available: &[BomFile], names: &[String]) -> Result<Vec<BomFile>> {
    if names.is_empty() {
        return Ok(available.to_vec());
    }

    if let Some(missing) = names
        .iter()
        .find(|name| !available.iter().any(|f| &f.file_name == *name))
    {
        return Err(LcrError::FileNotFound(missing.clone()));
    }

    Ok(available
        .iter()
        .filter(|f| names.contains(&f.file_name))
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    fn bom(name: &str) -> BomFile {
        BomFile {
            path: PathBuf::from(name),
            file_name: name.to_string(),
        }
    }

    #[test]
    fn test_is_bom_file() {
        assert!(is_bom_file(Path::new("a.xlsx")));
        assert!(is_bom_file(Path::new("A.XLSX")));
        assert!(!is_bom_file(Path::new("a.xls")));
        assert!(!is_bom_file(Path::new("a.csv")));
        assert!(!is_bom_file(Path::new("xlsx")));
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(LcrError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_folder_filters_and_sorts() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("c.xlsx")).unwrap();
        File::create(dir.path().join("a.xlsx")).unwrap();
        File::create(dir.path().join("B.XLSX")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();
        std::fs::create_dir(dir.path().join("sub.xlsx")).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        File::create(dir.path().join("nested").join("deep.xlsx")).unwrap();

        let files = scan_folder(dir.path()).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["B.XLSX", "a.xlsx", "c.xlsx"]);
    }

    #[test]
    fn test_select_files_defaults_to_all() {
        let available = vec![bom("a.xlsx"), bom("b.xlsx")];
        assert_eq!(select_files(&available, &[]).unwrap(), available);
    }

    #[test]
    fn test_select_files_keeps_folder_order() {
        let available = vec![bom("a.xlsx"), bom("b.xlsx"), bom("c.xlsx")];
        let picked = select_files(&available, &["c.xlsx".into(), "a.xlsx".into()]).unwrap();
        assert_eq!(picked, vec![bom("a.xlsx"), bom("c.xlsx")]);
    }

    #[test]
    fn test_select_unknown_file() {
        let available = vec![bom("a.xlsx")];
        let result = select_files(&available, &["z.xlsx".into()]);
        assert!(matches!(result, Err(LcrError::FileNotFound(name)) if name == "z.xlsx"));
    }
}
