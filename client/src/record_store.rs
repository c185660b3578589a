//! Record store - binds the engine state to the API client.
//!
//! Every write goes through [`RecordStore::attempt_remote_then_fallback`]:
//! the remote call is tried once, a success is followed by a full refresh
//! from the server, and a failure applies the equivalent change to the
//! local list instead.

use std::future::Future;

use cadastro_engine::{error::Result, FormFields, Mode, Notice, Store, UsuarioId};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::ApiError;

/// How an action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The API accepted the change
    Remote,
    /// The API call failed and the change was applied locally
    Local,
    /// Validation rejected the input; nothing was sent
    Rejected,
}

/// The list, the form and the API client behind them.
#[derive(Debug)]
pub struct RecordStore {
    store: Store,
    api: ApiClient,
}

impl RecordStore {
    /// Create an uninitialized store.
    pub fn new(api: ApiClient) -> Self {
        Self {
            store: Store::new(),
            api,
        }
    }

    /// Read access to the current state.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The pending form.
    pub fn form_mut(&mut self) -> &mut FormFields {
        self.store.form_mut()
    }

    /// The API client in use.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Fetch the full list from the API once.
    ///
    /// Success replaces the list; failure keeps it and switches to a
    /// fallback mode.
    pub async fn initialize(&mut self) -> Mode {
        match self.api.list().await {
            Ok(records) => {
                info!(count = records.len(), "loaded users from API");
                self.store.replace_all(records);
                self.store.set_notice(Notice::Connected);
            }
            Err(e) => {
                warn!(error = %e, "API unavailable, using local mode");
                self.store.mark_unreachable();
                self.store.set_notice(Notice::ApiUnavailable);
            }
        }
        self.store.mode()
    }

    /// Submit the pending form.
    pub async fn create(&mut self) -> Result<Outcome> {
        let new = match self.store.validate_form() {
            Ok(new) => new,
            Err(e) => {
                info!(error = %e, "form rejected");
                return Ok(Outcome::Rejected);
            }
        };

        let body = new.clone();
        let outcome = self
            .attempt_remote_then_fallback(
                move |api| async move { api.create(&body).await },
                move |store, created| match created {
                    Some(usuario) => {
                        let id = store.insert_remote(usuario).id;
                        info!(id, "user added from API response");
                    }
                    None => {
                        let id = store.insert_provisional(new, now_millis()).id;
                        info!(id, "user added locally");
                    }
                },
            )
            .await?;

        self.store.form_mut().clear();
        self.report(outcome, Notice::Saved, Notice::SavedLocally);
        Ok(outcome)
    }

    /// Fill the form with `fields` and submit it.
    pub async fn create_from(&mut self, fields: FormFields) -> Result<Outcome> {
        *self.store.form_mut() = fields;
        self.create().await
    }

    /// Delete a record.
    pub async fn delete(&mut self, id: UsuarioId) -> Result<Outcome> {
        let outcome = self
            .attempt_remote_then_fallback(
                move |api| async move { api.delete(id).await },
                move |store, _| {
                    if store.remove_local(id).is_none() {
                        warn!(id, "user not in local list");
                    }
                },
            )
            .await?;

        self.report(outcome, Notice::Deleted, Notice::DeletedLocally);
        Ok(outcome)
    }

    /// Set the banner for a finished write.
    ///
    /// A remote success whose refresh failed keeps the refresh's banner.
    fn report(&mut self, outcome: Outcome, remote: Notice, local: Notice) {
        match outcome {
            Outcome::Remote if self.store.mode() == Mode::Connected => {
                self.store.set_notice(remote)
            }
            Outcome::Local => self.store.set_notice(local),
            _ => {}
        }
    }

    /// Try `action` against the API; on failure apply `local_mutation`.
    ///
    /// A successful action is followed by [`RecordStore::initialize`] so the
    /// list reflects the server; if that refresh fails, `local_mutation`
    /// receives the action's result so the list still shows the confirmed
    /// change. A failed action calls `local_mutation` with `None`, leaving the
    /// list as mutated locally, and marks the store degraded. Fails only when
    /// another request is still outstanding.
    pub async fn attempt_remote_then_fallback<T, A, Fut, L>(
        &mut self,
        action: A,
        local_mutation: L,
    ) -> Result<Outcome>
    where
        A: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = std::result::Result<T, ApiError>>,
        L: FnOnce(&mut Store, Option<T>),
    {
        self.store.begin_request()?;

        let outcome = match action(self.api.clone()).await {
            Ok(confirmed) => {
                if self.initialize().await != Mode::Connected {
                    local_mutation(&mut self.store, Some(confirmed));
                }
                Outcome::Remote
            }
            Err(e) => {
                warn!(error = %e, "remote call failed, applying change locally");
                local_mutation(&mut self.store, None);
                self.store.mark_write_failed();
                Outcome::Local
            }
        };

        self.store.finish_request();
        Ok(outcome)
    }
}

/// Milliseconds since the Unix epoch, used for provisional ids.
fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}
