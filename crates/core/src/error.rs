use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to write record file {path}: {source}", path = path.display())]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(
        "{path}:{line}: expected {expected} fields, found {found}",
        path = path.display()
    )]
    FieldCount {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("{path}:{line}: invalid {field} value {value:?}", path = path.display())]
    InvalidField {
        path: PathBuf,
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error(
        "{path} holds text that cannot be written in its original encoding",
        path = path.display()
    )]
    Encoding { path: PathBuf },
    #[error("failed to read console input: {0}")]
    ConsoleRead(std::io::Error),
    #[error("failed to write console output: {0}")]
    ConsoleWrite(std::io::Error),
}

pub type ClinicResult<T> = std::result::Result<T, ClinicError>;
