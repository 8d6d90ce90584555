//! Console login session.
//!
//! One session handles exactly one login attempt:
//!
//! ```text
//! Start -> AwaitCredentials -> PhysicianSession -> End
//!                           -> PatientSession -> AssignPhysician -> End
//!                           -> Failed -> End
//! ```
//!
//! Input is consumed as whitespace-separated tokens, which may span lines. Diagnostics go to
//! stderr; the console output carries only the prompts and messages of the login protocol.

use crate::auth::{authenticate, Authenticated};
use crate::config::CoreConfig;
use crate::records::{Patient, Physician, User};
use crate::store::{load_patients, load_physicians, save_patients, TextEncoding};
use crate::{ClinicError, ClinicResult};
use clinic_types::LoginId;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::Path;

/// Token-oriented console over any reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    /// Writes `text` without a newline and flushes, so the prompt is visible before blocking.
    fn prompt(&mut self, text: &str) -> ClinicResult<()> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(ClinicError::ConsoleWrite)
    }

    fn line(&mut self, text: &str) -> ClinicResult<()> {
        writeln!(self.output, "{text}").map_err(ClinicError::ConsoleWrite)
    }

    fn flush(&mut self) -> ClinicResult<()> {
        self.output.flush().map_err(ClinicError::ConsoleWrite)
    }

    /// Next whitespace-delimited token, or `None` at end of input.
    fn next_token(&mut self) -> ClinicResult<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(ClinicError::ConsoleRead)?;
            if read == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }

    /// Reads the next token as a login id. Missing or non-integer input yields `None`.
    fn next_login_id(&mut self) -> ClinicResult<Option<LoginId>> {
        Ok(self
            .next_token()?
            .and_then(|token| token.parse::<LoginId>().ok()))
    }
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A physician logged in and was greeted. No file was written.
    PhysicianWelcomed(LoginId),
    /// A patient chose a new physician. `saved` is false if the patient file could not be
    /// written.
    PhysicianReassigned {
        patient: LoginId,
        physician: LoginId,
        saved: bool,
    },
    /// A patient logged in but did not supply a usable physician id.
    ReassignmentAbandoned(LoginId),
    /// No record matched the supplied credentials.
    LoginFailed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SessionState {
    Start,
    AwaitCredentials,
    PhysicianSession(usize),
    PatientSession(usize),
    AssignPhysician { patient: usize, physician: LoginId },
    Failed,
    End(SessionOutcome),
}

pub struct Session<R, W> {
    config: CoreConfig,
    console: Console<R, W>,
    physicians: Vec<Physician>,
    patients: Vec<Patient>,
    patient_encoding: TextEncoding,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: CoreConfig, console: Console<R, W>) -> Self {
        Self {
            config,
            console,
            physicians: Vec::new(),
            patients: Vec::new(),
            patient_encoding: TextEncoding::default(),
        }
    }

    /// Runs the session to completion.
    ///
    /// # Errors
    ///
    /// Returns a `ClinicError` if:
    /// - either record file is malformed,
    /// - the console cannot be read or written.
    ///
    /// A failed save is not an error: it is reported on stderr and in the outcome.
    pub fn run(mut self) -> ClinicResult<SessionOutcome> {
        let mut state = SessionState::Start;
        loop {
            if let SessionState::End(outcome) = state {
                self.console.flush()?;
                return Ok(outcome);
            }
            state = self.step(state)?;
        }
    }

    fn step(&mut self, state: SessionState) -> ClinicResult<SessionState> {
        match state {
            SessionState::Start => {
                let physicians = load_physicians(&self.config.physician_file())?;
                if physicians.is_absent() {
                    tracing::debug!("no physician file; roster is empty");
                }
                let patients = load_patients(&self.config.patient_file())?;
                if patients.is_absent() {
                    tracing::debug!("no patient file; patient list is empty");
                }

                self.patient_encoding = patients.encoding();
                self.physicians = physicians.into_records();
                self.patients = patients.into_records();
                tracing::debug!(
                    "session started with {} physicians and {} patients",
                    self.physicians.len(),
                    self.patients.len()
                );
                Ok(SessionState::AwaitCredentials)
            }
            SessionState::AwaitCredentials => self.await_credentials(),
            SessionState::PhysicianSession(index) => {
                let physician = &self.physicians[index];
                let login_id = physician.login_id();
                tracing::debug!("physician logged in: {}", physician);

                let greeting = format!("Welcome Dr. {}!", physician.full_name());
                self.console.line(&greeting)?;
                Ok(SessionState::End(SessionOutcome::PhysicianWelcomed(login_id)))
            }
            SessionState::PatientSession(index) => self.patient_session(index),
            SessionState::AssignPhysician { patient, physician } => {
                self.assign_physician(patient, physician)
            }
            SessionState::Failed => {
                self.console.line("Login failed.")?;
                Ok(SessionState::End(SessionOutcome::LoginFailed))
            }
            SessionState::End(outcome) => Ok(SessionState::End(outcome)),
        }
    }

    fn await_credentials(&mut self) -> ClinicResult<SessionState> {
        self.console.prompt("Login ID: ")?;
        let login_id = self.console.next_login_id()?;
        self.console.prompt("Password: ")?;
        let password = self.console.next_token()?;

        let (Some(login_id), Some(password)) = (login_id, password) else {
            tracing::debug!("credentials incomplete or login id not numeric");
            return Ok(SessionState::Failed);
        };

        let next = match authenticate(&self.physicians, &self.patients, login_id, &password) {
            Some(Authenticated::Physician(index)) => SessionState::PhysicianSession(index),
            Some(Authenticated::Patient(index)) => SessionState::PatientSession(index),
            None => {
                tracing::debug!("no record matched login id {}", login_id);
                SessionState::Failed
            }
        };
        Ok(next)
    }

    fn patient_session(&mut self, index: usize) -> ClinicResult<SessionState> {
        let patient = &self.patients[index];
        let patient_id = patient.login_id();
        tracing::debug!("patient logged in: {}", patient);

        let greeting = format!("Welcome {}!", patient.full_name());
        self.console.line(&greeting)?;

        self.console.line("")?;
        self.console.line("Available Physicians:")?;
        for physician in &self.physicians {
            let entry = format!("{}: Dr. {}", physician.login_id(), physician.full_name());
            self.console.line(&entry)?;
        }

        self.console.prompt("Enter new physician ID to assign: ")?;
        match self.console.next_login_id()? {
            Some(physician) => Ok(SessionState::AssignPhysician {
                patient: index,
                physician,
            }),
            None => {
                self.console.line("Invalid physician ID.")?;
                Ok(SessionState::End(SessionOutcome::ReassignmentAbandoned(
                    patient_id,
                )))
            }
        }
    }

    fn assign_physician(
        &mut self,
        index: usize,
        physician: LoginId,
    ) -> ClinicResult<SessionState> {
        let patient = &mut self.patients[index];
        patient.assign_physician(physician);
        let patient_id = patient.login_id();
        tracing::debug!("physician reassigned: {}", patient);
        self.console.line("Physician updated successfully.")?;

        let path = self.config.patient_file();
        let saved = match save_patients(&path, &self.patients, self.patient_encoding) {
            Ok(()) => {
                self.console.line("Patient data saved to file successfully.")?;
                true
            }
            Err(e) => {
                tracing::debug!("save failed: {:?}", e);
                eprintln!("{}", save_failure_message(&path, &e));
                false
            }
        };

        Ok(SessionState::End(SessionOutcome::PhysicianReassigned {
            patient: patient_id,
            physician,
            saved,
        }))
    }
}

/// Single-line diagnostic for a patient file that could not be saved.
fn save_failure_message(path: &Path, err: &ClinicError) -> String {
    let reason = match err {
        ClinicError::FileWrite { source, .. } => source.to_string(),
        other => other.to_string(),
    };
    format!("Error saving to file: {} ({})", path.display(), reason)
}
