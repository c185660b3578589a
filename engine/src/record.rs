//! Record types for the user list.

use crate::{Age, UsuarioId};
use serde::{Deserialize, Serialize};

/// Origin of a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Created locally while the API was unreachable (provisional)
    Local,
    /// Received from the server
    #[default]
    Remote,
}

/// A user record as stored in the list.
///
/// Field names on the wire follow the server's API (`nome`, `idade`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usuario {
    /// Server-assigned id, or a millisecond timestamp for provisional records
    pub id: UsuarioId,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    /// The server model allows a missing age
    #[serde(rename = "idade", default)]
    pub age: Option<Age>,
    /// Never sent to or read from the server
    #[serde(skip)]
    pub origin: Origin,
}

impl Usuario {
    /// Create a server-side record.
    pub fn new(
        id: UsuarioId,
        name: impl Into<String>,
        email: impl Into<String>,
        age: Option<Age>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            age,
            origin: Origin::Remote,
        }
    }

    /// Create a provisional record from validated form input.
    pub fn provisional(id: UsuarioId, new: NewUsuario) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            age: Some(new.age),
            origin: Origin::Local,
        }
    }

    /// Check if the record exists only in memory.
    pub fn is_provisional(&self) -> bool {
        self.origin == Origin::Local
    }
}

/// Body of a create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUsuario {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "idade")]
    pub age: Age,
}

impl NewUsuario {
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: Age) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
        }
    }
}
