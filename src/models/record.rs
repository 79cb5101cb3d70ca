use crate::database::{BANNERS, DOCTORS, RESERVATIONS, TESTS, USERS};

/// A collection of opaque records exposed over the CRUD routes.
pub trait RecordKind: 'static {
    const COLLECTION: &'static str;
    /// Singular name used in "not found" responses.
    const LABEL: &'static str;
}

pub struct Users;
pub struct Tests;
pub struct Doctors;
pub struct Reservations;
pub struct Banners;

impl RecordKind for Users {
    const COLLECTION: &'static str = USERS;
    const LABEL: &'static str = "User";
}

impl RecordKind for Tests {
    const COLLECTION: &'static str = TESTS;
    const LABEL: &'static str = "Test";
}

impl RecordKind for Doctors {
    const COLLECTION: &'static str = DOCTORS;
    const LABEL: &'static str = "Doctor";
}

impl RecordKind for Reservations {
    const COLLECTION: &'static str = RESERVATIONS;
    const LABEL: &'static str = "Reservation";
}

impl RecordKind for Banners {
    const COLLECTION: &'static str = BANNERS;
    const LABEL: &'static str = "Banner";
}
