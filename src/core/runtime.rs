//! # Effect Runtime
//!
//! Turns an `Effect` into backend calls and the resulting `Action`.
//! The TUI spawns each leaf effect as its own tokio task so the UI keeps
//! drawing while requests are in flight; [`drive`] runs them one after
//! another for headless flows.

use std::collections::VecDeque;

use log::{debug, warn};

use crate::api::ChatBackend;
use crate::core::action::{Action, Effect};
use crate::core::store::Store;

/// Perform one leaf effect. Returns the action carrying its result, or
/// `None` for effects with nothing to report.
pub async fn perform(effect: Effect, backend: &dyn ChatBackend) -> Option<Action> {
    match effect {
        Effect::CheckAuth => Some(Action::AuthChecked(backend.check_auth().await)),
        Effect::Login { email, password } => {
            let result = backend.login(&email, password.expose()).await;
            Some(Action::LoginFinished { email, result })
        }
        Effect::Signup { email, password } => Some(Action::SignupFinished(
            backend.signup(&email, password.expose()).await,
        )),
        Effect::Logout => Some(Action::LogoutFinished(backend.logout().await)),
        Effect::LoadSessions => Some(Action::SessionsLoaded(backend.fetch_sessions().await)),
        Effect::CreateSession { origin, email } => {
            let result = backend.create_session(email.as_deref()).await;
            Some(Action::SessionCreated { origin, result })
        }
        Effect::LoadMessages { session_id } => {
            let result = backend.fetch_messages(&session_id).await;
            Some(Action::MessagesLoaded { session_id, result })
        }
        Effect::SendMessage { session_id, text } => {
            let result = backend.send_message(&session_id, &text).await;
            Some(Action::MessageSent { session_id, result })
        }
        Effect::Batch(effects) => {
            warn!(
                "perform() got a batch of {} effects; flatten before performing",
                effects.len()
            );
            None
        }
        Effect::None | Effect::Quit => None,
    }
}

/// Dispatch `action` and keep performing effects until none are left.
/// Returns `true` if a quit was requested.
pub async fn drive(store: &mut Store, backend: &dyn ChatBackend, action: Action) -> bool {
    let mut pending: VecDeque<Effect> = store.dispatch(action).flatten().into();
    let mut quit = false;

    while let Some(effect) = pending.pop_front() {
        if effect == Effect::Quit {
            quit = true;
            continue;
        }
        debug!("Performing {:?} against {}", effect, backend.name());
        if let Some(result) = perform(effect, backend).await {
            pending.extend(store.dispatch(result).flatten());
        }
    }
    quit
}
