//! Reclaiming scopes that only their own closures still hold.
//!
//! The arena's scopes and the arrays, objects and functions reachable from
//! their bindings form a graph. A node's holders not explained by edges
//! inside the graph belong to something outside it: a running context, a
//! value on the host's stack, the root object. Everything reachable from
//! such a node is live; the remaining scopes are freed.

use std::rc::Rc;

use patch_stack::ensure_sufficient_stack;
use rustc_hash::{FxHashMap, FxHashSet};

use super::{ScopeArena, ScopeId, Unbound, MIN_COLLECT_THRESHOLD};
use crate::value::PatchFunction;
use crate::{ObjectRef, Value};

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
enum Node {
    Scope(ScopeId),
    /// An array, object or function, by address.
    Shared(usize),
}

/// A value was mutably borrowed while the graph was built.
struct Busy;

struct Graph<'a> {
    arena: &'a ScopeArena,
    index: FxHashMap<Node, usize>,
    /// Holders of each node minus the edges pointing at it.
    outside: Vec<i64>,
    edges: Vec<Vec<usize>>,
}

fn address<T>(shared: &Rc<T>) -> usize {
    Rc::as_ptr(shared).cast::<()>() as usize
}

fn strong_count<T>(shared: &Rc<T>) -> i64 {
    i64::try_from(Rc::strong_count(shared)).unwrap_or(i64::MAX)
}

impl<'a> Graph<'a> {
    fn new(arena: &'a ScopeArena) -> Self {
        Graph {
            arena,
            index: FxHashMap::default(),
            outside: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Index of `node`, and whether it was just added.
    fn node(&mut self, node: Node, holders: i64) -> (usize, bool) {
        if let Some(&index) = self.index.get(&node) {
            return (index, false);
        }
        let index = self.outside.len();
        self.index.insert(node, index);
        self.outside.push(holders);
        self.edges.push(Vec::new());
        (index, true)
    }

    fn edge(&mut self, from: usize, to: usize) {
        self.edges[from].push(to);
        self.outside[to] -= 1;
    }

    fn scopes(&mut self) -> Result<(), Busy> {
        let arena = self.arena;
        for (id, record) in arena.records() {
            self.node(Node::Scope(id), i64::from(record.holders));
        }
        for (id, record) in arena.records() {
            let (from, _) = self.node(Node::Scope(id), 0);
            if let Some(&parent) = record.parent.and_then(|parent| self.index.get(&Node::Scope(parent))) {
                self.edge(from, parent);
            }
            for binding in record.bindings.values() {
                self.value(from, &binding.value)?;
            }
        }
        Ok(())
    }

    fn value(&mut self, from: usize, value: &Value) -> Result<(), Busy> {
        match value {
            Value::Array(items) => {
                let (to, new) = self.node(Node::Shared(address(items)), strong_count(items));
                self.edge(from, to);
                if new {
                    let items = items.try_borrow().map_err(|_| Busy)?;
                    for item in items.iter() {
                        ensure_sufficient_stack(|| self.value(to, item))?;
                    }
                }
                Ok(())
            }
            Value::Object(map) => self.object(from, map),
            Value::Function(function) => self.function(from, function),
            Value::Null | Value::Boolean(_) | Value::Number(_) | Value::String(_) => Ok(()),
        }
    }

    fn object(&mut self, from: usize, map: &ObjectRef) -> Result<(), Busy> {
        let (to, new) = self.node(Node::Shared(address(map)), strong_count(map));
        self.edge(from, to);
        if new {
            let map = map.try_borrow().map_err(|_| Busy)?;
            for value in map.values() {
                ensure_sufficient_stack(|| self.value(to, value))?;
            }
        }
        Ok(())
    }

    fn function(&mut self, from: usize, function: &Rc<PatchFunction>) -> Result<(), Busy> {
        let (to, new) = self.node(Node::Shared(address(function)), strong_count(function));
        self.edge(from, to);
        if !new {
            return Ok(());
        }
        match &**function {
            PatchFunction::Defined(defined) => {
                // Closures from another evaluation hold scopes of another arena.
                let scope = defined.captured.scope_in(self.arena);
                if let Some(&scope) = scope.and_then(|scope| self.index.get(&Node::Scope(scope))) {
                    self.edge(to, scope);
                }
                self.object(to, defined.captured.root())
            }
            PatchFunction::Bound { target, receiver } => {
                self.function(to, target)?;
                self.value(to, receiver)
            }
            PatchFunction::Native(_) => Ok(()),
        }
    }

    /// Whether each node is reachable from one held from outside.
    fn live(&self) -> Vec<bool> {
        let mut live = vec![false; self.outside.len()];
        let mut stack = Vec::new();
        for (index, &holders) in self.outside.iter().enumerate() {
            if holders > 0 {
                live[index] = true;
                stack.push(index);
            }
        }
        while let Some(node) = stack.pop() {
            for &next in &self.edges[node] {
                if !live[next] {
                    live[next] = true;
                    stack.push(next);
                }
            }
        }
        live
    }
}

impl ScopeArena {
    /// Free every scope that is held only from inside unreachable scopes.
    pub(super) fn collect(&mut self, unbound: &mut Unbound) {
        self.suspects = 0;
        let Ok(garbage) = self.garbage() else {
            tracing::trace!("scope collection skipped: a value is being modified");
            return;
        };
        let before = self.live;
        let doomed: FxHashSet<ScopeId> = garbage.iter().copied().collect();
        for id in garbage {
            let parent = self.free_slot(id, unbound);
            if let Some(parent) = parent.filter(|parent| !doomed.contains(parent)) {
                self.drop_holder(parent, unbound);
            }
        }
        self.collect_threshold = MIN_COLLECT_THRESHOLD.max(self.live);
        tracing::trace!(freed = before - self.live, live = self.live, "scopes collected");
    }

    fn garbage(&self) -> Result<Vec<ScopeId>, Busy> {
        let mut graph = Graph::new(self);
        graph.scopes()?;
        let live = graph.live();
        Ok(self
            .records()
            .map(|(id, _)| id)
            .filter(|id| {
                graph
                    .index
                    .get(&Node::Scope(*id))
                    .is_some_and(|&index| !live[index])
            })
            .collect())
    }
}
