//! Store - the in-memory state container.
//!
//! The Store holds the displayed list, the pending form and the connection
//! mode. It never talks to the network: callers report what happened
//! remotely and the Store applies the matching change.

use crate::{
    error::Result, Error, FormFields, Mode, NewUsuario, Notice, Origin, Timestamp, Usuario,
    UsuarioId,
};
use std::collections::HashSet;

/// The main store holding all state.
#[derive(Debug, Clone, Default)]
pub struct Store {
    /// Displayed records, newest provisional first
    records: Vec<Usuario>,
    /// Pending form input
    form: FormFields,
    /// Connection mode
    mode: Mode,
    /// Last banner
    notice: Option<Notice>,
    /// Set while a remote call is outstanding
    busy: bool,
}

impl Store {
    /// Create an empty, uninitialized store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the connection mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Get the displayed records in order.
    pub fn records(&self) -> &[Usuario] {
        &self.records
    }

    /// Get a record by ID.
    pub fn get(&self, id: UsuarioId) -> Option<&Usuario> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Check if a record exists.
    pub fn contains(&self, id: UsuarioId) -> bool {
        self.get(id).is_some()
    }

    /// Records that exist only in memory.
    pub fn provisional(&self) -> impl Iterator<Item = &Usuario> {
        self.records.iter().filter(|r| r.is_provisional())
    }

    /// Count of displayed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the pending form.
    pub fn form(&self) -> &FormFields {
        &self.form
    }

    /// Get the pending form for editing.
    pub fn form_mut(&mut self) -> &mut FormFields {
        &mut self.form
    }

    /// Validate the pending form.
    ///
    /// On failure the banner is set and the list is left untouched.
    pub fn validate_form(&mut self) -> Result<NewUsuario> {
        self.form.validate().inspect_err(|err| {
            self.notice = Some(Notice::from(err));
        })
    }

    /// Get the last banner.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Replace the banner.
    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Check if a remote call is outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Mark a remote call as started.
    pub fn begin_request(&mut self) -> Result<()> {
        if self.busy {
            return Err(Error::Busy);
        }
        self.busy = true;
        Ok(())
    }

    /// Mark the outstanding remote call as finished.
    pub fn finish_request(&mut self) {
        self.busy = false;
    }

    /// Replace the list with the server's payload.
    pub fn replace_all(&mut self, records: Vec<Usuario>) {
        self.records = dedup_by_id(records);
        self.mode = Mode::Connected;
    }

    /// Record a failed list fetch. The list is kept as it is.
    pub fn mark_unreachable(&mut self) {
        self.mode = self.mode.after_refresh_failure();
    }

    /// Record a failed create or delete.
    pub fn mark_write_failed(&mut self) {
        self.mode = self.mode.after_write_failure();
    }

    /// Prepend a provisional record built from validated input.
    ///
    /// The id is the given timestamp, moved forward until it is unused.
    pub fn insert_provisional(&mut self, new: NewUsuario, timestamp: Timestamp) -> &Usuario {
        let mut id = timestamp;
        while self.contains(id) {
            id += 1;
        }

        self.records.insert(0, Usuario::provisional(id, new));
        &self.records[0]
    }

    /// Prepend a record the server confirmed, keeping its server id.
    ///
    /// Any record already shown under that id is replaced.
    pub fn insert_remote(&mut self, mut usuario: Usuario) -> &Usuario {
        usuario.origin = Origin::Remote;
        self.records.retain(|r| r.id != usuario.id);
        self.records.insert(0, usuario);
        &self.records[0]
    }

    /// Remove a record from memory only.
    pub fn remove_local(&mut self, id: UsuarioId) -> Option<Usuario> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }
}

/// Keep the first occurrence of each id.
fn dedup_by_id(records: Vec<Usuario>) -> Vec<Usuario> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|r| seen.insert(r.id))
        .map(|mut r| {
            r.origin = Origin::Remote;
            r
        })
        .collect()
}
