//! Shared mutable context read by guards and written by leaf actions.

use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// Typed handle to a blackboard slot.
///
/// The id is the slot; the type parameter only fixes what is stored there. Two keys with the same
/// id but different types refer to the same slot, and reading through the wrong one panics.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BbKey<T: 'static> {
    id: u64,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Copy for BbKey<T> {}

impl<T: 'static> Clone for BbKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> BbKey<T> {
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    pub fn id(self) -> u64 {
        self.id
    }
}

struct Slot {
    type_name: &'static str,
    value: Box<dyn Any>,
}

#[derive(Default)]
pub struct Blackboard {
    slots: BTreeMap<u64, Slot>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn contains<T: 'static>(&self, key: BbKey<T>) -> bool {
        self.slots.contains_key(&key.id)
    }

    /// Store `value`, returning whatever the slot held before.
    pub fn set<T: 'static>(&mut self, key: BbKey<T>, value: T) -> Option<T> {
        let previous = self.slots.insert(
            key.id,
            Slot {
                type_name: type_name::<T>(),
                value: Box::new(value),
            },
        )?;
        Some(unbox(key, previous))
    }

    pub fn get<T: 'static>(&self, key: BbKey<T>) -> Option<&T> {
        let slot = self.slots.get(&key.id)?;
        match slot.value.downcast_ref::<T>() {
            Some(value) => Some(value),
            None => mismatch::<T>(key.id, slot.type_name),
        }
    }

    pub fn get_mut<T: 'static>(&mut self, key: BbKey<T>) -> Option<&mut T> {
        let slot = self.slots.get_mut(&key.id)?;
        let stored = slot.type_name;
        match slot.value.downcast_mut::<T>() {
            Some(value) => Some(value),
            None => mismatch::<T>(key.id, stored),
        }
    }

    /// Copy out the value at `key`, or `fallback` when the slot is empty.
    pub fn get_or<T: Copy + 'static>(&self, key: BbKey<T>, fallback: T) -> T {
        self.get(key).copied().unwrap_or(fallback)
    }

    /// Apply `f` to the value at `key`, inserting `T::default()` first if the slot is empty.
    pub fn update<T: Default + 'static, R>(
        &mut self,
        key: BbKey<T>,
        f: impl FnOnce(&mut T) -> R,
    ) -> R {
        if !self.contains(key) {
            self.set(key, T::default());
        }
        match self.get_mut(key) {
            Some(value) => f(value),
            None => unreachable!("slot {} was just populated", key.id),
        }
    }

    pub fn remove<T: 'static>(&mut self, key: BbKey<T>) -> Option<T> {
        let slot = self.slots.remove(&key.id)?;
        Some(unbox(key, slot))
    }
}

impl core::fmt::Debug for Blackboard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().map(|(id, slot)| (id, slot.type_name)))
            .finish()
    }
}

fn unbox<T: 'static>(key: BbKey<T>, slot: Slot) -> T {
    let stored = slot.type_name;
    match slot.value.downcast::<T>() {
        Ok(value) => *value,
        Err(_) => mismatch::<T>(key.id, stored),
    }
}

fn mismatch<T: 'static>(id: u64, stored: &'static str) -> ! {
    panic!(
        "blackboard type mismatch for key id={id} (stored {stored}, requested {})",
        type_name::<T>()
    )
}
