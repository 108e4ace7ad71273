//! Minimal observer with scoped subscriptions.
//!
//! Dropping a [`Subscription`] removes its listener, so a view that keeps its
//! subscriptions as fields cannot leak listeners across remounts.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::domain::auth::AuthChange;

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Fragment (or request path) changes.
pub type FragmentEvents = EventSource<String>;
/// Sign-in and sign-out notifications.
pub type AuthEvents = EventSource<AuthChange>;

struct Registry<E> {
    next_id: u64,
    listeners: Vec<(u64, Listener<E>)>,
}

fn lock<E>(registry: &Mutex<Registry<E>>) -> MutexGuard<'_, Registry<E>> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Broadcasts events to every live subscriber.
pub struct EventSource<E> {
    registry: Arc<Mutex<Registry<E>>>,
}

impl<E> Clone for EventSource<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E: 'static> Default for EventSource<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> EventSource<E> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&E) + Send + Sync + 'static) -> Subscription {
        let id = {
            let mut registry = lock(&self.registry);
            registry.next_id += 1;
            let id = registry.next_id;
            registry.listeners.push((id, Arc::new(listener)));
            id
        };

        let weak: Weak<Mutex<Registry<E>>> = Arc::downgrade(&self.registry);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    lock(&registry).listeners.retain(|(other, _)| *other != id);
                }
            })),
        }
    }

    /// Calls every listener outside the registry lock, so listeners may
    /// subscribe or unsubscribe while handling an event.
    pub fn emit(&self, event: &E) {
        let listeners: Vec<Listener<E>> = lock(&self.registry)
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.registry).listeners.len()
    }
}

/// Handle that keeps a listener registered until dropped.
#[must_use = "dropping a subscription unregisters its listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn delivers_until_dropped() {
        let source = EventSource::<u32>::new();
        let total = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&total);
        let subscription = source.subscribe(move |value| {
            counter.fetch_add(*value as usize, Ordering::SeqCst);
        });
        source.emit(&2);
        source.emit(&3);
        assert_eq!(source.listener_count(), 1);

        drop(subscription);
        source.emit(&10);

        assert_eq!(total.load(Ordering::SeqCst), 5);
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn unsubscribe_only_removes_own_listener() {
        let source = EventSource::<()>::new();
        let first = source.subscribe(|_| {});
        let _second = source.subscribe(|_| {});

        first.unsubscribe();

        assert_eq!(source.listener_count(), 1);
    }

    #[test]
    fn subscription_outliving_source_is_harmless() {
        let source = EventSource::<()>::new();
        let subscription = source.subscribe(|_| {});
        drop(source);
        drop(subscription);
    }
}
