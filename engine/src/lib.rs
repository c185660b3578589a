//! # Cadastro Engine
//!
//! The in-memory state behind the cadastro client: a list of users, the
//! pending form fields, and the connection mode that decides whether the
//! list mirrors the server or has diverged from it.
//!
//! ## Design Principles
//!
//! - **No IO**: Engine has no knowledge of HTTP, files, or terminals
//! - **Deterministic**: Timestamps are passed in, never read from the clock
//! - **Testable**: Pure logic, no mocks needed
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! A [`Usuario`] is a flat record (`id`, `nome`, `email`, `idade`). Records
//! read from the server carry [`Origin::Remote`]; records created while the
//! API is unreachable are provisional and carry [`Origin::Local`].
//!
//! ### Form
//!
//! [`FormFields`] holds the raw strings typed by the user. Validation turns
//! them into a [`NewUsuario`] or rejects them without touching the list.
//!
//! ### Mode
//!
//! [`Mode`] tracks whether the list is authoritative:
//! - [`Mode::Uninitialized`] - nothing fetched yet
//! - [`Mode::Connected`] - last refresh came from the server
//! - [`Mode::LocalFallback`] - the first fetch failed
//! - [`Mode::Degraded`] - a write or refresh failed after connecting
//!
//! ## Quick Start
//!
//! ```rust
//! use cadastro_engine::{Mode, NewUsuario, Store, Usuario};
//!
//! let mut store = Store::new();
//!
//! // A successful fetch replaces the list.
//! store.replace_all(vec![Usuario::new(1, "Ana", "a@x.com", Some(30))]);
//! assert_eq!(store.mode(), Mode::Connected);
//!
//! // A failed create falls back to a provisional record.
//! let new = NewUsuario::new("Bia", "b@x.com", 25);
//! let id = store.insert_provisional(new, 1706745600000).id;
//! store.mark_write_failed();
//!
//! assert_eq!(store.len(), 2);
//! assert_eq!(store.records()[0].id, id);
//! assert_eq!(store.mode(), Mode::Degraded);
//! ```

pub mod error;
pub mod form;
pub mod mode;
pub mod notice;
pub mod record;
pub mod store;

// Re-export main types at crate root
pub use error::Error;
pub use form::FormFields;
pub use mode::Mode;
pub use notice::Notice;
pub use record::{NewUsuario, Origin, Usuario};
pub use store::Store;

/// Type aliases for clarity
pub type UsuarioId = u64;
pub type Age = u8;
pub type Timestamp = u64;

/// Upper bound accepted for [`Age`].
pub const MAX_AGE: Age = 100;
