//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the session.
//! Nothing below the binary reads environment variables.

use crate::constants::{DEFAULT_DATA_DIR, PATIENT_FILE_NAME, PHYSICIAN_FILE_NAME};
use crate::{ClinicError, ClinicResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The directory does not have to exist: missing record files load as empty datasets.
    /// It must not be an existing non-directory path.
    pub fn new(data_dir: PathBuf) -> ClinicResult<Self> {
        if data_dir.as_os_str().is_empty() {
            return Err(ClinicError::InvalidInput(
                "data directory cannot be empty".into(),
            ));
        }

        if data_dir.exists() && !data_dir.is_dir() {
            return Err(ClinicError::InvalidInput(format!(
                "data directory {} is not a directory",
                data_dir.display()
            )));
        }

        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn physician_file(&self) -> PathBuf {
        self.data_dir.join(PHYSICIAN_FILE_NAME)
    }

    pub fn patient_file(&self) -> PathBuf {
        self.data_dir.join(PATIENT_FILE_NAME)
    }
}

/// Resolve the data directory from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the current working directory (`.`).
pub fn data_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn unset_or_blank_value_defaults_to_working_directory() {
        assert_eq!(data_dir_from_env_value(None), PathBuf::from("."));
        assert_eq!(data_dir_from_env_value(Some("   ".into())), PathBuf::from("."));
    }

    #[test]
    fn explicit_value_is_trimmed() {
        assert_eq!(
            data_dir_from_env_value(Some(" /srv/clinic ".into())),
            PathBuf::from("/srv/clinic")
        );
    }

    #[test]
    fn record_files_resolve_under_data_dir() {
        let temp = TempDir::new().unwrap();
        let cfg = CoreConfig::new(temp.path().to_path_buf()).unwrap();

        assert_eq!(cfg.data_dir(), temp.path());
        assert_eq!(cfg.physician_file(), temp.path().join("Physician.csv"));
        assert_eq!(cfg.patient_file(), temp.path().join("Patient.csv"));
    }

    #[test]
    fn missing_data_dir_is_accepted() {
        let temp = TempDir::new().unwrap();
        let cfg = CoreConfig::new(temp.path().join("not-yet-created"));
        assert!(cfg.is_ok());
    }

    #[test]
    fn file_as_data_dir_is_rejected() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("records.txt");
        fs::write(&file, "not a directory").unwrap();

        let cfg = CoreConfig::new(file);
        assert!(matches!(cfg, Err(ClinicError::InvalidInput(_))));
    }

    #[test]
    fn empty_data_dir_is_rejected() {
        let cfg = CoreConfig::new(PathBuf::new());
        assert!(matches!(cfg, Err(ClinicError::InvalidInput(_))));
    }
}
