//! Platform catalog loading and validation.
//!
//! The catalog is a JSON object mapping platform names to definitions.
//! Keys starting with `$` hold metadata (`$schema`, `$version`, ...) and are
//! kept verbatim without validation.

use crate::errors::{FindmeError, FindmeResult};
use crate::models::{is_metadata_key, Catalog, ErrorType, PlatformDefinition, USERNAME_PLACEHOLDER};
use std::path::{Path, PathBuf};

/// Catalog file looked up when no path is given.
pub const DEFAULT_CATALOG_FILE: &str = "data.json";

/// Catalog compiled into the binary, used when no catalog file is present.
pub const BUNDLED_CATALOG: &str = include_str!("../data/platforms.json");

/// Resolve a catalog path: as given, then next to the executable.
pub fn locate(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    if path.is_absolute() {
        return None;
    }

    let exe_dir = std::env::current_exe().ok()?.parent()?.to_path_buf();
    let candidate = exe_dir.join(path);
    log::trace!("Trying catalog candidate {:?}", candidate);
    candidate.is_file().then_some(candidate)
}

/// Load the catalog the CLI asked for.
///
/// An explicit path must exist. Without one, `data.json` is looked up and the
/// bundled catalog is the fallback.
pub fn load_catalog(explicit: Option<&Path>) -> FindmeResult<Catalog> {
    match explicit {
        Some(path) => {
            let resolved = locate(path).ok_or_else(|| FindmeError::CatalogNotFound(path.to_path_buf()))?;
            load_file(&resolved)
        }
        None => match locate(Path::new(DEFAULT_CATALOG_FILE)) {
            Some(resolved) => load_file(&resolved),
            None => {
                log::info!("No {} found, using bundled catalog", DEFAULT_CATALOG_FILE);
                parse_catalog(BUNDLED_CATALOG)
            }
        },
    }
}

pub fn load_file(path: &Path) -> FindmeResult<Catalog> {
    log::info!("Loading catalog from {:?}", path);
    let raw = std::fs::read_to_string(path).map_err(|e| FindmeError::io(e, path.to_path_buf()))?;
    parse_catalog(&raw)
}

pub fn parse_catalog(raw: &str) -> FindmeResult<Catalog> {
    let root: serde_json::Value = serde_json::from_str(raw)?;
    let serde_json::Value::Object(entries) = root else {
        return Err(FindmeError::catalog("<root>", "catalog must be a JSON object"));
    };

    let mut catalog = Catalog::new();
    for (name, value) in entries {
        if is_metadata_key(&name) {
            catalog.insert_metadata(name, value);
            continue;
        }

        let definition: PlatformDefinition =
            serde_json::from_value(value).map_err(|e| FindmeError::catalog(&name, e.to_string()))?;
        validate_definition(&name, &definition)?;
        catalog.insert_platform(name, definition);
    }

    log::debug!(
        "Catalog holds {} platforms ({} entries)",
        catalog.platforms().count(),
        catalog.len()
    );
    Ok(catalog)
}

pub fn validate_definition(name: &str, definition: &PlatformDefinition) -> FindmeResult<()> {
    if name.trim().is_empty() {
        return Err(FindmeError::catalog(name, "platform name must not be empty"));
    }

    let placeholders = definition.url.matches(USERNAME_PLACEHOLDER).count();
    if placeholders != 1 {
        return Err(FindmeError::catalog(
            name,
            format!("url must contain exactly one '{}', found {}", USERNAME_PLACEHOLDER, placeholders),
        ));
    }

    match (definition.error_type, &definition.error_msg) {
        (ErrorType::Message, Some(msg)) if msg.has_blank_pattern() => Err(FindmeError::catalog(
            name,
            "errorMsg must not contain empty strings",
        )),
        (ErrorType::Message, Some(msg)) if !msg.is_empty() => Ok(()),
        (ErrorType::Message, _) => Err(FindmeError::catalog(
            name,
            "errorType 'message' requires a non-empty errorMsg",
        )),
        (ErrorType::StatusCode, Some(_)) => Err(FindmeError::catalog(
            name,
            "errorMsg is only allowed with errorType 'message'",
        )),
        (ErrorType::StatusCode, None) => Ok(()),
    }
}
