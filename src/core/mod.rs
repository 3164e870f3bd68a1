//! # Core Application Logic
//!
//! HealthFirst's business logic. It knows nothing about any specific UI
//! technology and does no I/O of its own.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │          CORE           │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Store (subscribers)  │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │  runtime   │
//!     │  Adapter   │ ◄──────── Action ─────── │ (backend)  │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`auth_gate`]: Route → screen resolution
//! - [`store`]: Owns the `App` and notifies subscribers
//! - [`runtime`]: Performs effects against a `ChatBackend`

pub mod action;
pub mod auth_gate;
pub mod config;
pub mod runtime;
pub mod state;
pub mod store;
pub mod validation;
