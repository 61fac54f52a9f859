//! Task id interning.
//!
//! Maps the snapshot's string ids onto dense integer node ids so every pass
//! can use `Vec` indexing instead of string-keyed maps.

use rustc_hash::FxHashMap;

/// Dense node id (u32 for compact storage and fast hashing).
pub type NodeId = u32;

/// Interner borrowing ids from the task snapshot.
///
/// Node ids follow first-insertion order, so node order equals input order.
#[derive(Debug, Clone, Default)]
pub struct TaskIdInterner<'a> {
    to_node: FxHashMap<&'a str, NodeId>,
    ids: Vec<&'a str>,
}

impl<'a> TaskIdInterner<'a> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_node: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            ids: Vec::with_capacity(capacity),
        }
    }

    /// Intern `id`, returning `None` if it was already present.
    pub fn insert(&mut self, id: &'a str) -> Option<NodeId> {
        if self.to_node.contains_key(id) {
            return None;
        }
        let node = self.ids.len() as NodeId;
        self.ids.push(id);
        self.to_node.insert(id, node);
        Some(node)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<NodeId> {
        self.to_node.get(id).copied()
    }

    #[inline]
    pub fn resolve(&self, node: NodeId) -> &'a str {
        self.ids[node as usize]
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_resolve() {
        let mut interner = TaskIdInterner::with_capacity(4);

        let a = interner.insert("task_a").unwrap();
        let b = interner.insert("task_b").unwrap();
        assert_eq!(interner.insert("task_a"), None);

        assert_eq!((a, b), (0, 1));
        assert_eq!(interner.len(), 2);
        assert_eq!(interner.resolve(b), "task_b");
        assert_eq!(interner.get("task_a"), Some(a));
        assert_eq!(interner.get("missing"), None);
    }
}
