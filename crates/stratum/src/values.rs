//! Per-identity control values.
//!
//! Controls that edit a caller's value (a slider position, a toggle) keep a
//! copy here. The caller hands its value in on every declaration, the control
//! reads it during process, and when the user changes it the control stores
//! the new value as an *incoming* change. The caller's next declaration picks
//! the change up and writes it back into its own variable.

use std::{any::Any, collections::HashMap};

use crate::{
    error::{Error, Result},
    id::Identity,
};

/// One stored value.
struct Slot {
    /// The value itself.
    value: Box<dyn Any>,
    /// Set when the control changed the value and the caller has not seen it.
    incoming: bool,
}

/// Typed values keyed by node identity.
#[derive(Default)]
pub struct ValueStore {
    /// Stored slots.
    slots: HashMap<Identity, Slot>,
}

impl ValueStore {
    /// Construct an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change made by the control. The caller sees it on its next
    /// declaration.
    pub fn set<T: Any>(&mut self, identity: Identity, value: T) {
        self.slots.insert(
            identity,
            Slot {
                value: Box::new(value),
                incoming: true,
            },
        );
    }

    /// Store a value without flagging it as a change.
    pub fn store<T: Any>(&mut self, identity: Identity, value: T) {
        self.slots.insert(
            identity,
            Slot {
                value: Box::new(value),
                incoming: false,
            },
        );
    }

    /// Exchange a value with the caller.
    ///
    /// If the control recorded a change since the last call, `target` is
    /// overwritten with it and `true` is returned. Otherwise the caller's
    /// value replaces the stored one.
    pub fn update_for<T: Any + Clone>(&mut self, identity: Identity, target: &mut T) -> bool {
        if let Some(slot) = self.slots.get_mut(&identity)
            && slot.incoming
            && let Some(v) = slot.value.downcast_ref::<T>()
        {
            *target = v.clone();
            slot.incoming = false;
            return true;
        }
        self.store(identity, target.clone());
        false
    }

    /// Borrow a stored value.
    pub fn get<T: Any>(&self, identity: Identity) -> Result<&T> {
        self.slots
            .get(&identity)
            .and_then(|s| s.value.downcast_ref::<T>())
            .ok_or(Error::MissingValue(identity))
    }

    /// Mutably borrow a stored value. Does not flag a change.
    pub fn get_mut<T: Any>(&mut self, identity: Identity) -> Result<&mut T> {
        self.slots
            .get_mut(&identity)
            .and_then(|s| s.value.downcast_mut::<T>())
            .ok_or(Error::MissingValue(identity))
    }

    /// A stored value, or `default` if none of this type exists.
    pub fn get_or<T: Any + Clone>(&self, identity: Identity, default: T) -> T {
        self.get::<T>(identity).cloned().unwrap_or(default)
    }

    /// Is any value stored for this identity?
    pub fn has(&self, identity: Identity) -> bool {
        self.slots.contains_key(&identity)
    }

    /// Is there a change the caller has not seen yet?
    pub fn has_incoming(&self, identity: Identity) -> bool {
        self.slots.get(&identity).is_some_and(|s| s.incoming)
    }

    /// Drop the value for an identity.
    pub fn remove(&mut self, identity: Identity) -> bool {
        self.slots.remove(&identity).is_some()
    }

    /// Drop every value.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_value_flows_in() -> Result<()> {
        let mut store = ValueStore::new();
        let id = Identity::from_raw(7);
        let mut v = 0.25_f32;
        assert!(!store.update_for(id, &mut v));
        assert_eq!(*store.get::<f32>(id)?, 0.25);
        assert!(!store.has_incoming(id));
        Ok(())
    }

    #[test]
    fn control_change_flows_out_once() {
        let mut store = ValueStore::new();
        let id = Identity::from_raw(7);
        let mut v = 1_i32;
        store.update_for(id, &mut v);
        store.set(id, 5_i32);
        assert!(store.has_incoming(id));

        assert!(store.update_for(id, &mut v));
        assert_eq!(v, 5);
        assert!(!store.has_incoming(id));

        v = 9;
        assert!(!store.update_for(id, &mut v));
        assert_eq!(store.get_or(id, 0_i32), 9);
    }

    #[test]
    fn missing_and_mistyped_values_fail() {
        let mut store = ValueStore::new();
        let id = Identity::from_raw(3);
        assert_eq!(store.get::<f32>(id), Err(Error::MissingValue(id)));
        store.store(id, String::from("x"));
        assert_eq!(store.get::<f32>(id), Err(Error::MissingValue(id)));
        assert!(store.remove(id));
        assert!(!store.has(id));
    }
}
