use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::event::{InputEvent, InputKind};

/// Receiver of normalized input events.
///
/// Closures `FnMut(&InputEvent)` implement this, so most game code registers
/// a closure through [`listener`].
pub trait InputListener {
    fn handle_input(&mut self, event: &InputEvent);
}

impl<F> InputListener for F
where
    F: FnMut(&InputEvent),
{
    fn handle_input(&mut self, event: &InputEvent) {
        self(event)
    }
}

/// Shared listener reference. Identity (the allocation) is what
/// [`Listeners::unsubscribe`] matches on.
pub type ListenerRef = Rc<RefCell<dyn InputListener>>;

/// Wraps a closure or listener value into a [`ListenerRef`].
pub fn listener<L: InputListener + 'static>(l: L) -> ListenerRef {
    Rc::new(RefCell::new(l))
}

/// Registration table: abstract kind → listeners in registration order.
#[derive(Default)]
pub struct Listeners {
    table: HashMap<InputKind, Vec<ListenerRef>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for `kind`. Registering twice delivers twice.
    pub fn subscribe(&mut self, kind: InputKind, listener: ListenerRef) {
        self.table.entry(kind).or_default().push(listener);
    }

    /// Registers `listener` for every abstract kind.
    pub fn subscribe_all(&mut self, listener: ListenerRef) {
        for kind in InputKind::ALL {
            self.subscribe(kind, Rc::clone(&listener));
        }
    }

    /// Removes every registration of `listener` (matched by identity).
    pub fn unsubscribe(&mut self, listener: &ListenerRef) {
        for entries in self.table.values_mut() {
            entries.retain(|l| !Rc::ptr_eq(l, listener));
        }
    }

    pub fn count(&self, kind: InputKind) -> usize {
        self.table.get(&kind).map_or(0, Vec::len)
    }

    /// Synchronously notifies every listener registered for `event.kind`.
    pub fn dispatch(&self, event: &InputEvent) {
        let Some(entries) = self.table.get(&event.kind) else { return };
        for l in entries {
            match l.try_borrow_mut() {
                Ok(mut l) => l.handle_input(event),
                // A listener that is already running is being re-entered.
                Err(_) => log::warn!("skipping re-entrant {} listener", event.kind),
            }
        }
    }
}
