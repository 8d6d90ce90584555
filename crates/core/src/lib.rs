//! # Clinic Core
//!
//! Core logic for the two-role clinic login utility.
//!
//! This crate contains:
//! - Physician and patient records sharing a common credentials header
//! - Flat-file loading and saving of both record kinds
//! - Linear-scan authentication across the loaded records
//! - The console session that greets physicians and lets a patient reassign their physician
//!
//! **No process concerns**: reading the environment and installing a log subscriber belong
//! in the `clinic` binary.

pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod records;
pub mod session;
pub mod store;

pub use config::CoreConfig;
pub use error::{ClinicError, ClinicResult};
pub use records::{Credentials, Patient, Physician, User};
pub use session::{Console, Session, SessionOutcome};
pub use store::{Loaded, TextEncoding};

pub use clinic_types::{LoginId, Role};
