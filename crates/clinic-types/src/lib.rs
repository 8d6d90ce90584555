//! Primitive types shared across the clinic crates.
//!
//! Both record kinds are keyed by an integer login identifier, and both report a fixed
//! role label for display. These live here so that the core crate and the binary agree on
//! a single representation.

use std::str::FromStr;

/// Errors that can occur when parsing a login identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LoginIdError {
    /// The input was empty or contained only whitespace
    #[error("login ID cannot be empty")]
    Empty,
    /// The input was not a base-10 integer in range
    #[error("login ID is not an integer: {0:?}")]
    NotAnInteger(String),
}

/// Integer identifier used to log in, and to reference a physician from a patient row.
///
/// Uniqueness is not enforced anywhere; two records of the same kind may share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoginId(i32);

impl LoginId {
    /// Wraps a raw integer id.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }
}

impl From<i32> for LoginId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl FromStr for LoginId {
    type Err = LoginIdError;

    /// Parses a login id, ignoring leading and trailing whitespace.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LoginIdError::Empty);
        }
        trimmed
            .parse::<i32>()
            .map(Self)
            .map_err(|_| LoginIdError::NotAnInteger(trimmed.to_owned()))
    }
}

impl std::fmt::Display for LoginId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two kinds of account that can log in.
///
/// The label is for display only; callers branch on which collection matched, not on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Physician,
    Patient,
}

impl Role {
    /// Fixed display label for the role.
    pub const fn label(self) -> &'static str {
        match self {
            Role::Physician => "Physician",
            Role::Patient => "Patient",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
