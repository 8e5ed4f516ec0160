// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Handle devuelto por `subscribe`; se usa para desuscribirse al desmontar una vista
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

/// Estado reactivo con sistema de notificaciones.
///
/// Los clones comparten valor y subscribers.
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<(u64, Callback)>>>,
    next_id: Rc<Cell<u64>>,
}

impl<T> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    /// Leer el valor sin clonarlo
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&*self.value.borrow())
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Actualizar valor usando closure y notificar
    pub fn update<R>(&self, updater: impl FnOnce(&mut T) -> R) -> R {
        let result = updater(&mut *self.value.borrow_mut());
        self.notify();
        result
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        Subscription(id)
    }

    /// `false` si la suscripción ya no existía
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(id, _)| *id != subscription.0);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn notify(&self) {
        // Copia de los callbacks: un callback puede leer el estado o desuscribirse
        let callbacks: Vec<Callback> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in callbacks {
            callback();
        }
    }
}

impl<T: Clone> ReactiveState<T> {
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
            next_id: self.next_id.clone(),
        }
    }
}

impl<T: Default> Default for ReactiveState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_value_and_subscribers() {
        let state = ReactiveState::new(1);
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        state.subscribe(move || counter.set(counter.get() + 1));

        let other = state.clone();
        other.set(5);
        assert_eq!(state.get(), 5);
        assert_eq!(hits.get(), 1);

        let doubled = state.update(|v| {
            *v *= 2;
            *v
        });
        assert_eq!(doubled, 10);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn unsubscribed_views_are_not_notified() {
        let state = ReactiveState::new(String::new());
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let subscription = state.subscribe(move || counter.set(counter.get() + 1));

        assert!(state.unsubscribe(subscription));
        assert!(!state.unsubscribe(subscription));
        state.set("late".to_string());
        assert_eq!(hits.get(), 0);
        assert_eq!(state.subscriber_count(), 0);
        assert_eq!(state.with(|s| s.len()), 4);
    }

    #[test]
    fn callbacks_may_read_state() {
        let state = ReactiveState::new(0u32);
        let seen = Rc::new(Cell::new(0));
        let (reader, sink) = (state.clone(), seen.clone());
        state.subscribe(move || sink.set(reader.get()));
        state.set(7);
        assert_eq!(seen.get(), 7);
    }
}
