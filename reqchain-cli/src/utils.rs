use std::path::{Path, PathBuf};

use reqchain_core::{parse_flow_str, validate_flow, DocumentFormat, FlowError, RequestFlow};

pub fn flow_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "flow".to_string())
}

/// Read, parse, and validate one flow file. The flow takes its name from the
/// file stem.
pub fn load_flow(path: &Path) -> Result<RequestFlow, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let parsed = parse_flow_str(&content, &flow_name(path), DocumentFormat::Auto)
        .map_err(|e| LoadError::Flow {
            path: path.display().to_string(),
            source: e.into(),
        })?;
    validate_flow(&parsed.flow).map_err(|e| LoadError::Flow {
        path: path.display().to_string(),
        source: e.into(),
    })?;
    Ok(parsed.flow)
}

/// Expand files and directories into a flat list of flow files. Directories
/// contribute their `*.yaml`/`*.yml` entries sorted by file name.
pub fn collect_flow_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let entries = std::fs::read_dir(path).map_err(|e| LoadError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            let mut found = Vec::new();
            for entry in entries {
                let entry = entry.map_err(|e| LoadError::Io {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
                let p = entry.path();
                if matches!(
                    p.extension().and_then(|e| e.to_str()),
                    Some("yaml") | Some("yml")
                ) {
                    found.push(p);
                }
            }
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

#[derive(Debug)]
pub enum LoadError {
    Io { path: String, message: String },
    Flow { path: String, source: FlowError },
}

impl LoadError {
    pub fn is_validation(&self) -> bool {
        matches!(self, LoadError::Flow { .. })
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, message } => write!(f, "failed to read {path}: {message}"),
            LoadError::Flow { path, source } => write!(f, "{path}: {source}"),
        }
    }
}
