//! Constants used throughout the clinic core crate.
//!
//! File names and header rows are kept here so the loader, the writer and the
//! configuration agree on the on-disk layout.

/// Filename for the physician record file.
pub const PHYSICIAN_FILE_NAME: &str = "Physician.csv";

/// Filename for the patient record file.
pub const PATIENT_FILE_NAME: &str = "Patient.csv";

/// Header row written at the top of the physician file.
pub const PHYSICIAN_HEADER: &str = "login_id,password,first_name,last_name,title,expertise";

/// Header row written at the top of the patient file.
pub const PATIENT_HEADER: &str =
    "login_id,password,first_name,last_name,weight,height,blood_pressure,physician_id";

/// Sole field delimiter. Fields are never quoted or escaped.
pub const FIELD_DELIMITER: &str = ",";

/// Environment variable that overrides the directory holding both record files.
pub const DATA_DIR_ENV: &str = "CLINIC_DATA_DIR";

/// Data directory used when no override is configured.
pub const DEFAULT_DATA_DIR: &str = ".";
