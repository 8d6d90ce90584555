//! Physician and patient records.
//!
//! Both record kinds embed the same [`Credentials`] header and expose the shared
//! capability set through the [`User`] trait. Physicians are read-only once loaded.
//! A patient's attending physician is the single mutable field.

use clinic_types::{LoginId, Role};

/// Fields common to every account.
#[derive(Clone, Debug, PartialEq)]
pub struct Credentials {
    pub login_id: LoginId,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl Credentials {
    pub fn new(
        login_id: LoginId,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            login_id,
            password: password.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// Capabilities shared by both record kinds.
pub trait User {
    fn credentials(&self) -> &Credentials;

    fn role(&self) -> Role;

    fn login_id(&self) -> LoginId {
        self.credentials().login_id
    }

    /// First and last name separated by a single space.
    fn full_name(&self) -> String {
        let c = self.credentials();
        format!("{} {}", c.first_name, c.last_name)
    }

    /// Exact, case-sensitive match on both id and password.
    fn authenticate(&self, login_id: LoginId, password: &str) -> bool {
        let c = self.credentials();
        c.login_id == login_id && c.password == password
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Physician {
    credentials: Credentials,
    title: String,
    expertise: String,
}

impl Physician {
    pub fn new(
        credentials: Credentials,
        title: impl Into<String>,
        expertise: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            title: title.into(),
            expertise: expertise.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn expertise(&self) -> &str {
        &self.expertise
    }
}

impl User for Physician {
    fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn role(&self) -> Role {
        Role::Physician
    }
}

impl std::fmt::Display for Physician {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: Dr. {} ({})",
            self.login_id(),
            self.full_name(),
            self.expertise
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Patient {
    credentials: Credentials,
    weight: f64,
    height: f64,
    blood_pressure: String,
    physician_id: LoginId,
}

impl Patient {
    pub fn new(
        credentials: Credentials,
        weight: f64,
        height: f64,
        blood_pressure: impl Into<String>,
        physician_id: LoginId,
    ) -> Self {
        Self {
            credentials,
            weight,
            height,
            blood_pressure: blood_pressure.into(),
            physician_id,
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn blood_pressure(&self) -> &str {
        &self.blood_pressure
    }

    /// Attending physician. Not checked against the loaded physician set.
    pub fn physician_id(&self) -> LoginId {
        self.physician_id
    }

    pub fn assign_physician(&mut self, physician_id: LoginId) {
        self.physician_id = physician_id;
    }
}

impl User for Patient {
    fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn role(&self) -> Role {
        Role::Patient
    }
}

impl std::fmt::Display for Patient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} | Weight: {}, Height: {}, BP: {}, Physician ID: {}",
            self.login_id(),
            self.full_name(),
            self.weight,
            self.height,
            self.blood_pressure,
            self.physician_id
        )
    }
}
