//! Variable scopes.
//!
//! Scopes live in a [`ScopeArena`] and refer to their parent by index.
//! Each scope counts its holders: the context that entered it, its child
//! scopes, and the closures that captured it. A scope whose count reaches
//! zero is freed and drops its hold on the parent.
//!
//! A closure stored in the scope it captured keeps that scope held after
//! it is exited. Scopes held only through such closures are found by
//! [`ScopeArena::collect`], which runs once enough scopes have been exited
//! while still held.

mod collect;

use rustc_hash::FxHashMap;

use patch_ir::Mutability;

use crate::errors::{
    duplicate_variable, immutable_binding, outer_scope_delete, undefined_variable, EvalResult,
};
use crate::Value;

/// Exited-but-held scopes tolerated before the first collection.
const MIN_COLLECT_THRESHOLD: usize = 64;

/// Index of a scope in its arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

#[derive(Debug)]
struct Binding {
    value: Value,
    mutability: Mutability,
}

#[derive(Debug)]
struct ScopeRecord {
    bindings: FxHashMap<String, Binding>,
    parent: Option<ScopeId>,
    holders: u32,
}

/// Values taken out of freed scopes.
///
/// Dropping a closure releases the scope it captured, which borrows the
/// arena again, so these must be dropped after the arena borrow ends.
#[must_use]
#[derive(Default)]
pub struct Unbound(Vec<Value>);

impl Unbound {
    fn take(&mut self, bindings: FxHashMap<String, Binding>) {
        self.0.extend(bindings.into_values().map(|binding| binding.value));
    }
}

#[derive(Debug)]
pub struct ScopeArena {
    slots: Vec<Option<ScopeRecord>>,
    free: Vec<u32>,
    live: usize,
    /// Releases since the last collection that left the scope held.
    suspects: usize,
    collect_threshold: usize,
}

impl Default for ScopeArena {
    fn default() -> Self {
        ScopeArena {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            suspects: 0,
            collect_threshold: MIN_COLLECT_THRESHOLD,
        }
    }
}

impl ScopeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scope whose lookups fall back to `parent`. The caller
    /// holds the new scope until it calls [`release`](Self::release).
    pub fn push(&mut self, parent: Option<ScopeId>) -> ScopeId {
        if let Some(record) = parent.and_then(|parent| self.slot_mut(parent)) {
            record.holders += 1;
        }
        let record = ScopeRecord {
            bindings: FxHashMap::default(),
            parent,
            holders: 1,
        };
        self.live += 1;
        if let Some(index) = self.free.pop() {
            self.slots[index as usize] = Some(record);
            return ScopeId(index);
        }
        let id = ScopeId(u32::try_from(self.slots.len()).unwrap_or(u32::MAX));
        self.slots.push(Some(record));
        id
    }

    /// Add a holder to `id`, for a closure created in it.
    pub fn retain(&mut self, id: ScopeId) {
        if let Some(record) = self.slot_mut(id) {
            record.holders += 1;
        }
    }

    /// Drop one holder of `id`. Frees `id` and then its ancestors as their
    /// counts reach zero.
    pub fn release(&mut self, id: ScopeId) -> Unbound {
        let mut unbound = Unbound::default();
        if !self.drop_holder(id, &mut unbound) {
            self.suspects += 1;
            if self.suspects >= self.collect_threshold {
                self.collect(&mut unbound);
            }
        }
        unbound
    }

    /// Whether `id` was freed.
    fn drop_holder(&mut self, id: ScopeId, unbound: &mut Unbound) -> bool {
        let mut next = Some(id);
        while let Some(scope) = next {
            let Some(record) = self.slot_mut(scope) else {
                break;
            };
            record.holders = record.holders.saturating_sub(1);
            if record.holders > 0 {
                return scope != id;
            }
            next = self.free_slot(scope, unbound);
        }
        true
    }

    /// Free `id` without touching its parent's count, which is returned.
    fn free_slot(&mut self, id: ScopeId, unbound: &mut Unbound) -> Option<ScopeId> {
        let record = self.slots.get_mut(id.0 as usize)?.take()?;
        self.free.push(id.0);
        self.live -= 1;
        unbound.take(record.bindings);
        record.parent
    }

    /// Number of allocated scopes.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    fn slot_mut(&mut self, id: ScopeId) -> Option<&mut ScopeRecord> {
        self.slots.get_mut(id.0 as usize)?.as_mut()
    }

    fn records(&self) -> impl Iterator<Item = (ScopeId, &ScopeRecord)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let index = u32::try_from(index).ok()?;
            Some((ScopeId(index), slot.as_ref()?))
        })
    }

    fn record(&self, id: ScopeId) -> &ScopeRecord {
        match &self.slots[id.0 as usize] {
            Some(record) => record,
            None => unreachable!("scope {id:?} used after it was freed"),
        }
    }

    fn record_mut(&mut self, id: ScopeId) -> &mut ScopeRecord {
        match &mut self.slots[id.0 as usize] {
            Some(record) => record,
            None => unreachable!("scope {id:?} used after it was freed"),
        }
    }

    /// The nearest scope from `id` outwards that binds `name`.
    fn find(&self, id: ScopeId, name: &str) -> Option<ScopeId> {
        let mut current = Some(id);
        while let Some(scope) = current {
            let record = self.record(scope);
            if record.bindings.contains_key(name) {
                return Some(scope);
            }
            current = record.parent;
        }
        None
    }

    /// Whether `name` is visible from `id`.
    pub fn has(&self, id: ScopeId, name: &str) -> bool {
        self.find(id, name).is_some()
    }

    pub fn lookup(&self, id: ScopeId, name: &str) -> EvalResult {
        self.find(id, name)
            .and_then(|scope| self.record(scope).bindings.get(name))
            .map(|binding| binding.value.clone())
            .ok_or_else(|| undefined_variable(name))
    }

    /// Declare `name` in `id`. Fails if `name` is already visible.
    pub fn define(
        &mut self,
        id: ScopeId,
        name: &str,
        value: Value,
        mutability: Mutability,
    ) -> EvalResult<()> {
        if self.has(id, name) {
            return Err(duplicate_variable(name));
        }
        self.define_shadowing(id, name, value, mutability);
        Ok(())
    }

    /// Declare `name` in `id`, hiding any outer binding. Used for
    /// parameters. Returns the value of a binding of the same name in `id`.
    pub fn define_shadowing(
        &mut self,
        id: ScopeId,
        name: &str,
        value: Value,
        mutability: Mutability,
    ) -> Option<Value> {
        self.record_mut(id)
            .bindings
            .insert(name.to_string(), Binding { value, mutability })
            .map(|binding| binding.value)
    }

    /// Store into the nearest binding of `name`, returning the old value.
    pub fn assign(&mut self, id: ScopeId, name: &str, value: Value) -> EvalResult<Value> {
        let scope = self.find(id, name).ok_or_else(|| undefined_variable(name))?;
        match self.record_mut(scope).bindings.get_mut(name) {
            Some(binding) if binding.mutability.is_mutable() => {
                Ok(std::mem::replace(&mut binding.value, value))
            }
            Some(_) => Err(immutable_binding(name)),
            None => Err(undefined_variable(name)),
        }
    }

    /// Remove `name` from `id` itself, returning its value. Outer bindings
    /// cannot be deleted.
    pub fn delete(&mut self, id: ScopeId, name: &str) -> EvalResult<Value> {
        if let Some(binding) = self.record_mut(id).bindings.remove(name) {
            return Ok(binding.value);
        }
        if self.has(id, name) {
            Err(outer_scope_delete(name))
        } else {
            Err(undefined_variable(name))
        }
    }
}
