//! Lexically scoped name→value map with an `outer` link for closures.
//!
//! Backed by a power-of-two open-addressing table using FNV-1a on the key,
//! linear probing, and a load-factor bound of 0.75, wrapped in
//! `Rc<RefCell<_>>` so closures and their enclosing scope can share one
//! mutable environment with interior-mutation semantics.

use std::cell::RefCell;
use std::rc::Rc;

use super::fnv::fnv1a;
use super::object::Object;

const INITIAL_CAPACITY: usize = 8;
const MAX_LOAD_FACTOR: f64 = 0.75;

struct Slot {
    name: String,
    value: Object,
}

struct Table {
    slots: Vec<Option<Slot>>,
    count: usize,
}

impl Table {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            count: 0,
        }
    }

    fn find_index(slots: &[Option<Slot>], name: &str) -> usize {
        let capacity = slots.len();
        let mut index = (fnv1a(name.as_bytes()) as usize) % capacity;
        loop {
            match &slots[index] {
                Some(slot) if slot.name != name => index = (index + 1) % capacity,
                _ => return index,
            }
        }
    }

    fn grow(&mut self) {
        let new_capacity = if self.slots.is_empty() {
            INITIAL_CAPACITY
        } else {
            self.slots.len() * 2
        };
        let mut new_slots: Vec<Option<Slot>> = (0..new_capacity).map(|_| None).collect();
        for slot in self.slots.drain(..).flatten() {
            let index = Self::find_index(&new_slots, &slot.name);
            new_slots[index] = Some(slot);
        }
        self.slots = new_slots;
    }

    fn set(&mut self, name: String, value: Object) {
        if self.slots.is_empty()
            || (self.count + 1) as f64 > self.slots.len() as f64 * MAX_LOAD_FACTOR
        {
            self.grow();
        }
        let index = Self::find_index(&self.slots, &name);
        if self.slots[index].is_none() {
            self.count += 1;
        }
        self.slots[index] = Some(Slot { name, value });
    }

    fn get(&self, name: &str) -> Option<Object> {
        if self.slots.is_empty() {
            return None;
        }
        let index = Self::find_index(&self.slots, name);
        self.slots[index].as_ref().map(|slot| slot.value.clone())
    }
}

struct EnvironmentInner {
    table: Table,
    outer: Option<Environment>,
}

/// A shared, interior-mutable handle to one scope. Cloning an `Environment`
/// clones the `Rc`, not the table — the captured environment of a closure and
/// the scope it closed over are the same environment.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<EnvironmentInner>>);

impl Environment {
    pub fn new_root() -> Self {
        Self(Rc::new(RefCell::new(EnvironmentInner {
            table: Table::new(),
            outer: None,
        })))
    }

    pub fn new_enclosed(outer: &Environment) -> Self {
        Self(Rc::new(RefCell::new(EnvironmentInner {
            table: Table::new(),
            outer: Some(outer.clone()),
        })))
    }

    /// Probes the local table; on miss, follows `outer` until found or exhausted.
    pub fn get(&self, name: &str) -> Option<Object> {
        let inner = self.0.borrow();
        if let Some(value) = inner.table.get(name) {
            return Some(value);
        }
        inner.outer.as_ref().and_then(|outer| outer.get(name))
    }

    /// Always inserts in the local table; replaces an existing binding of the
    /// same name in this scope (it does not shadow through to `outer`).
    pub fn set(&self, name: &str, value: Object) {
        self.0.borrow_mut().table.set(name.to_string(), value);
    }
}
