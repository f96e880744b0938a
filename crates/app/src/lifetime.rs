//! Page state bound to the lifetime of the view showing it.
//!
//! A page publishes its state through a [`ViewState`]. Once the view is torn down every
//! further update is dropped, so requests that resolve late cannot touch a discarded page.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::watch;

/// Cloneable handle reporting whether a view is still shown.
#[derive(Debug, Clone)]
pub struct Lifetime {
    alive: Arc<AtomicBool>,
}

impl Lifetime {
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

/// Observable page state that ignores updates after teardown.
#[derive(Debug)]
pub struct ViewState<S> {
    sender: watch::Sender<S>,
    lifetime: Lifetime,
}

impl<S> ViewState<S> {
    #[must_use]
    pub fn new(initial: S) -> Self {
        Self {
            sender: watch::Sender::new(initial),
            lifetime: Lifetime {
                alive: Arc::new(AtomicBool::new(true)),
            },
        }
    }

    #[must_use]
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime.clone()
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.lifetime.is_alive()
    }

    /// Apply `mutate` while the view is alive. Returns whether it was applied.
    pub fn update(&self, mutate: impl FnOnce(&mut S)) -> bool {
        self.update_if(|state| {
            mutate(state);
            true
        })
    }

    /// Apply `mutate` while the view is alive; it reports whether it changed anything.
    /// Watchers are only notified of changes.
    pub fn update_if(&self, mutate: impl FnOnce(&mut S) -> bool) -> bool {
        let alive = &self.lifetime;

        self.sender.send_if_modified(|state| alive.is_alive() && mutate(state))
    }

    /// Stop accepting updates. Runs under the state lock, so no update is half applied.
    pub fn teardown(&self) {
        let alive = &self.lifetime.alive;

        self.sender.send_if_modified(|_| {
            alive.store(false, Ordering::Release);
            false
        });
    }

    /// Receiver notified on every applied update.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.sender.subscribe()
    }

    /// Read the current state.
    pub fn with<R>(&self, read: impl FnOnce(&S) -> R) -> R {
        read(&self.sender.borrow())
    }
}

impl<S: Clone> ViewState<S> {
    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> S {
        self.sender.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updates_apply_until_teardown() {
        let state = ViewState::new(0_u32);
        let lifetime = state.lifetime();

        assert!(state.update(|value| *value += 1));

        state.teardown();

        assert!(!state.update(|value| *value += 1));
        assert!(!lifetime.is_alive());
        assert_eq!(state.snapshot(), 1);
    }

    #[test]
    fn subscribers_see_only_real_changes() {
        let state = ViewState::new(String::new());
        let mut receiver = state.subscribe();

        assert!(!state.update_if(|_| false));
        assert!(!receiver.has_changed().unwrap_or(true));

        state.update(|value| value.push_str("loaded"));

        assert!(receiver.has_changed().unwrap_or(false));
        assert_eq!(*receiver.borrow_and_update(), "loaded");
    }
}
