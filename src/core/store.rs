//! # Store
//!
//! Owns the single `App` and is the only place `update()` gets called from.
//! Views that need to react to changes register a subscriber; every
//! dispatch notifies all of them after the state has changed.

use log::debug;

use crate::core::action::{Action, Effect, update};
use crate::core::state::App;

type Subscriber = Box<dyn FnMut(&App) + Send>;

pub struct Store {
    app: App,
    subscribers: Vec<Subscriber>,
}

impl Store {
    pub fn new(app: App) -> Self {
        Self {
            app,
            subscribers: Vec::new(),
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&App) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Apply `action` and return the effect the caller should perform.
    pub fn dispatch(&mut self, action: Action) -> Effect {
        debug!("Dispatch {}", action.name());
        let effect = update(&mut self.app, action);
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&self.app);
        }
        effect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth_gate::Screen;
    use crate::test_support::test_app;
    use std::sync::{Arc, Mutex};

    #[test]
    fn subscribers_see_state_after_update() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut store = Store::new(test_app());
        let sink = seen.clone();
        store.subscribe(move |app| sink.lock().unwrap().push(app.status_message.clone()));

        let effect = store.dispatch(Action::AppStarted);
        assert_eq!(effect, Effect::CheckAuth);
        assert_eq!(seen.lock().unwrap().as_slice(), ["Loading..."]);
    }

    #[test]
    fn every_dispatch_notifies() {
        let count = Arc::new(Mutex::new(0));
        let mut store = Store::new(test_app());
        let counter = count.clone();
        store.subscribe(move |_| *counter.lock().unwrap() += 1);

        store.dispatch(Action::AppStarted);
        store.dispatch(Action::Quit);
        assert_eq!(*count.lock().unwrap(), 2);
        assert_eq!(store.app().screen, Screen::Loading);
    }
}
