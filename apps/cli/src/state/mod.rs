//! # State Module
//!
//! The session owns the only mutable copy of the store. Everything else in
//! the app reads it through `Session::state()` and changes it through
//! `Session::dispatch()`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   command ──► Session::dispatch ──► StoreState::apply (pure)            │
//! │                     │                       │                           │
//! │                     │        Ok(Transition) │ Err(CoreError)            │
//! │                     ▼                       ▼                           │
//! │            state = transition.state    state unchanged, warn! logged    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod session;

pub use session::{Outcome, Session};
