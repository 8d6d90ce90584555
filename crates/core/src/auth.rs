//! Linear-scan authentication across both record kinds.

use crate::records::{Patient, Physician, User};
use clinic_types::LoginId;

/// Which collection matched, and where.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Authenticated {
    /// Index into the physician roster.
    Physician(usize),
    /// Index into the patient list.
    Patient(usize),
}

/// Position of the first record, in load order, whose credentials match.
pub fn find_match<U: User>(records: &[U], login_id: LoginId, password: &str) -> Option<usize> {
    records
        .iter()
        .position(|record| record.authenticate(login_id, password))
}

/// Physicians are searched before patients, so a physician wins if both kinds share
/// the same credentials.
pub fn authenticate(
    physicians: &[Physician],
    patients: &[Patient],
    login_id: LoginId,
    password: &str,
) -> Option<Authenticated> {
    if let Some(index) = find_match(physicians, login_id, password) {
        return Some(Authenticated::Physician(index));
    }
    find_match(patients, login_id, password).map(Authenticated::Patient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Credentials;

    fn physician(id: i32, password: &str, first: &str) -> Physician {
        Physician::new(
            Credentials::new(LoginId::new(id), password, first, "Doe"),
            "Dr",
            "General Practice",
        )
    }

    fn patient(id: i32, password: &str, first: &str) -> Patient {
        Patient::new(
            Credentials::new(LoginId::new(id), password, first, "Smith"),
            80.0,
            180.0,
            "120/80",
            LoginId::new(1),
        )
    }

    #[test]
    fn physician_match_is_reported_by_index() {
        let physicians = vec![physician(1, "a", "Jane"), physician(4, "b", "Omar")];
        let patients = vec![patient(2, "c", "John")];

        assert_eq!(
            authenticate(&physicians, &patients, LoginId::new(4), "b"),
            Some(Authenticated::Physician(1))
        );
    }

    #[test]
    fn patient_matched_when_no_physician_does() {
        let physicians = vec![physician(1, "a", "Jane")];
        let patients = vec![patient(2, "c", "John"), patient(3, "d", "Kim")];

        assert_eq!(
            authenticate(&physicians, &patients, LoginId::new(3), "d"),
            Some(Authenticated::Patient(1))
        );
    }

    #[test]
    fn mismatch_in_either_field_fails() {
        let physicians = vec![physician(1, "a", "Jane")];
        let patients = vec![patient(2, "c", "John")];

        assert_eq!(authenticate(&physicians, &patients, LoginId::new(1), "c"), None);
        assert_eq!(authenticate(&physicians, &patients, LoginId::new(2), "a"), None);
        assert_eq!(authenticate(&physicians, &patients, LoginId::new(999), "x"), None);
    }

    #[test]
    fn first_duplicate_in_file_order_wins() {
        let patients = vec![patient(7, "same", "First"), patient(7, "same", "Second")];

        let index = find_match(&patients, LoginId::new(7), "same").unwrap();
        assert_eq!(index, 0);
        assert_eq!(patients[index].full_name(), "First Smith");
    }

    #[test]
    fn physicians_take_precedence_over_patients() {
        let physicians = vec![physician(5, "shared", "Jane")];
        let patients = vec![patient(5, "shared", "John")];

        assert_eq!(
            authenticate(&physicians, &patients, LoginId::new(5), "shared"),
            Some(Authenticated::Physician(0))
        );
    }

    #[test]
    fn empty_sets_never_match() {
        assert_eq!(authenticate(&[], &[], LoginId::new(1), "pw1"), None);
    }
}
