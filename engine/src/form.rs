//! Form fields and their validation.
//!
//! The form holds exactly what the user typed. Nothing reaches the list or
//! the network until [`FormFields::validate`] accepts it.

use crate::{error::Result, Age, Error, NewUsuario, MAX_AGE};

/// Raw input for a new user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    /// Kept as text so that an empty field stays distinguishable from zero
    pub age: String,
}

impl FormFields {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        age: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age: age.into(),
        }
    }

    /// Validate the fields into a request body.
    ///
    /// Whitespace-only fields count as empty. Fields are checked in the order
    /// the form shows them: name, email, age.
    pub fn validate(&self) -> Result<NewUsuario> {
        let name = required("nome", &self.name)?;
        let email = required("email", &self.email)?;
        let age = parse_age(required("idade", &self.age)?)?;

        Ok(NewUsuario::new(name, email, age))
    }

    /// Check if every field is empty.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.age.is_empty()
    }

    /// Reset every field.
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.age.clear();
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::MissingField(field));
    }
    Ok(value)
}

fn parse_age(raw: &str) -> Result<Age> {
    let age: i64 = raw
        .parse()
        .map_err(|_| Error::InvalidAge(raw.to_string()))?;

    if !(0..=i64::from(MAX_AGE)).contains(&age) {
        return Err(Error::AgeOutOfRange(age));
    }

    // Range checked above.
    Ok(age as Age)
}
