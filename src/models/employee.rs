//! Employee model.
//!
//! This module defines the Employee struct for representing workers in the
//! attendance system. Only the name participates in any logic; the remaining
//! attributes are carried through to the report unchanged.

use serde::{Deserialize, Serialize};

/// Represents an employee whose attendance is being classified.
///
/// The name is the identity key used by the overlay mergers. It is not
/// guaranteed unique after suffix-stripping, which is why the leave overlay
/// resolves rows by prefix rather than exact match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// The employee's name, as it appears on the punch sheet.
    pub name: String,
    /// The attendance group the employee belongs to.
    #[serde(default)]
    pub group: String,
    /// The employee's department.
    #[serde(default)]
    pub department: String,
    /// The internal employee number.
    #[serde(default)]
    pub employee_id: String,
    /// The employee's position title.
    #[serde(default)]
    pub position: String,
    /// The user id assigned by the upstream clock system.
    #[serde(default)]
    pub external_user_id: String,
}

impl Employee {
    /// Creates an employee with only a name, leaving the carried
    /// attributes empty. Mostly useful in tests.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: String::new(),
            department: String::new(),
            employee_id: String::new(),
            position: String::new(),
            external_user_id: String::new(),
        }
    }
}
