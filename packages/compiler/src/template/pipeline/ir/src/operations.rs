//! IR Operations
//!
//! Defines the base operation traits and `OpList`, the intrusive doubly linked list that holds a
//! unit's creation or update operations.

use std::fmt::Debug;
use std::ops::Deref;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::template::pipeline::ir::enums::OpKind;
use crate::template::pipeline::ir::handle::XrefId;

/// Base trait for semantic operations being performed within a template.
pub trait Op: Debug {
    /// Get the operation kind
    fn kind(&self) -> OpKind;

    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

/// Base trait for creation operations
pub trait CreateOp: Op {
    /// The `XrefId` identifying this operation, or `None` for ops other parts of the IR never
    /// refer to.
    fn xref(&self) -> Option<XrefId>;
}

/// Base trait for update operations
pub trait UpdateOp: Op {
    /// The `XrefId` of the creation op whose slot this operation is bound to, if any.
    fn target(&self) -> Option<XrefId>;
}

/// Position of a node inside one `OpList`.
///
/// Handles stay valid across insertions and removals of other nodes. A handle is only meaningful
/// for the list that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpHandle(usize);

const HEAD: usize = 0;
const TAIL: usize = 1;

#[derive(Debug, Clone)]
struct OpListNode<T> {
    /// `None` for the two `ListEnd` sentinels and for removed nodes.
    op: Option<T>,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A linked list of `Op` nodes of a given subtype.
///
/// Nodes live in an arena owned by the list and link to each other by index. Two permanent
/// `ListEnd` sentinels bound the list, so every data node has both a `prev` and a `next` and
/// splicing never needs to special-case the ends.
#[derive(Clone)]
pub struct OpList<T> {
    nodes: Vec<OpListNode<T>>,
    len: usize,
    /// Debug ID of this `OpList` instance.
    debug_list_id: usize,
}

impl<T> std::fmt::Debug for OpList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpList")
            .field("ops", &format!("[{} operations]", self.len))
            .field("debug_list_id", &self.debug_list_id)
            .finish()
    }
}

static NEXT_LIST_ID: AtomicUsize = AtomicUsize::new(0);

impl<T> OpList<T> {
    /// Create a new empty OpList with a unique debug ID.
    pub fn new() -> Self {
        let id = NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed);
        OpList {
            nodes: vec![
                OpListNode {
                    op: None,
                    prev: None,
                    next: Some(TAIL),
                },
                OpListNode {
                    op: None,
                    prev: Some(HEAD),
                    next: None,
                },
            ],
            len: 0,
            debug_list_id: id,
        }
    }

    /// The `ListEnd` sentinel preceding the first op.
    pub fn head(&self) -> OpHandle {
        OpHandle(HEAD)
    }

    /// The `ListEnd` sentinel following the last op.
    pub fn tail(&self) -> OpHandle {
        OpHandle(TAIL)
    }

    /// The first op of the list, or the tail sentinel if the list is empty.
    pub fn first(&self) -> OpHandle {
        self.next(self.head())
    }

    /// The last op of the list, or the head sentinel if the list is empty.
    pub fn last(&self) -> OpHandle {
        self.prev(self.tail())
    }

    /// Whether `handle` refers to one of the two `ListEnd` sentinels.
    pub fn is_list_end(&self, handle: OpHandle) -> bool {
        handle.0 == HEAD || handle.0 == TAIL
    }

    /// The node following `handle`.
    pub fn next(&self, handle: OpHandle) -> OpHandle {
        match self.linked(handle).next {
            Some(next) => OpHandle(next),
            None => panic!("AssertionError: the tail of a list has no next op"),
        }
    }

    /// The node preceding `handle`.
    pub fn prev(&self, handle: OpHandle) -> OpHandle {
        match self.linked(handle).prev {
            Some(prev) => OpHandle(prev),
            None => panic!("AssertionError: the head of a list has no previous op"),
        }
    }

    /// Get a reference to the op at `handle`. Returns `None` for sentinels and removed nodes.
    pub fn get(&self, handle: OpHandle) -> Option<&T> {
        self.nodes.get(handle.0).and_then(|node| node.op.as_ref())
    }

    /// Get a mutable reference to the op at `handle`.
    pub fn get_mut(&mut self, handle: OpHandle) -> Option<&mut T> {
        self.nodes.get_mut(handle.0).and_then(|node| node.op.as_mut())
    }

    /// Push a new operation to the tail of the list.
    pub fn push(&mut self, op: T) -> OpHandle {
        self.insert_before(op, self.tail())
    }

    /// Push multiple operations to the tail of the list.
    pub fn push_all(&mut self, ops: impl IntoIterator<Item = T>) {
        for op in ops {
            self.push(op);
        }
    }

    /// Prepend one or more nodes to the start of the list, keeping their relative order.
    pub fn prepend(&mut self, ops: impl IntoIterator<Item = T>) {
        let first = self.first();
        for op in ops {
            self.insert_before(op, first);
        }
    }

    /// Insert `op` into the list immediately before `before`, which may be the tail sentinel but
    /// never the head sentinel.
    pub fn insert_before(&mut self, op: T, before: OpHandle) -> OpHandle {
        assert!(
            before.0 != HEAD,
            "AssertionError: cannot insert an op before the head of a list"
        );
        let prev = match self.linked(before).prev {
            Some(prev) => prev,
            None => panic!("AssertionError: op {before:?} is not linked into this list"),
        };

        let index = self.nodes.len();
        self.nodes.push(OpListNode {
            op: Some(op),
            prev: Some(prev),
            next: Some(before.0),
        });
        self.nodes[prev].next = Some(index);
        self.nodes[before.0].prev = Some(index);
        self.len += 1;
        OpHandle(index)
    }

    /// Unlink the op at `handle` and return it.
    pub fn remove(&mut self, handle: OpHandle) -> T {
        assert!(
            !self.is_list_end(handle),
            "AssertionError: cannot remove a ListEnd sentinel"
        );
        let node = &mut self.nodes[handle.0];
        let (Some(op), Some(prev), Some(next)) = (node.op.take(), node.prev, node.next) else {
            panic!("AssertionError: op {handle:?} was already removed");
        };
        node.prev = None;
        node.next = None;
        self.nodes[prev].next = Some(next);
        self.nodes[next].prev = Some(prev);
        self.len -= 1;
        op
    }

    /// Replace the op at `handle` with `new_op`, keeping its position. Returns the old op.
    pub fn replace(&mut self, handle: OpHandle, new_op: T) -> T {
        match self.get_mut(handle) {
            Some(slot) => std::mem::replace(slot, new_op),
            None => panic!("AssertionError: op {handle:?} is not in this list"),
        }
    }

    /// Iterate over the handles of all ops, in list order.
    pub fn handles(&self) -> Handles<'_, T> {
        Handles {
            list: self,
            cursor: self.first(),
        }
    }

    /// Get an iterator over the operations (forward iteration).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            handles: self.handles(),
        }
    }

    /// Get a mutable iterator over the operations (forward iteration).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        let order: Vec<OpHandle> = self.handles().collect();
        let mut slots: Vec<Option<&mut T>> =
            self.nodes.iter_mut().map(|node| node.op.as_mut()).collect();
        order.into_iter().filter_map(move |handle| slots[handle.0].take())
    }

    /// Get a reversed iterator over the operations.
    pub fn reversed(&self) -> impl Iterator<Item = &T> + '_ {
        std::iter::successors(Some(self.last()), move |&handle| {
            self.nodes[handle.0].prev.map(OpHandle)
        })
        .take_while(move |&handle| !self.is_list_end(handle))
        .filter_map(move |handle| self.get(handle))
    }

    /// Get the number of operations
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the debug list ID
    pub fn debug_list_id(&self) -> usize {
        self.debug_list_id
    }

    fn linked(&self, handle: OpHandle) -> &OpListNode<T> {
        match self.nodes.get(handle.0) {
            Some(node) if node.prev.is_some() || node.next.is_some() => node,
            _ => panic!("AssertionError: op {handle:?} is not linked into this list"),
        }
    }
}

impl<T> OpList<T>
where
    T: Deref,
    T::Target: Op,
{
    /// The kind of the node at `handle`; `ListEnd` for the sentinels.
    pub fn op_kind(&self, handle: OpHandle) -> OpKind {
        if self.is_list_end(handle) {
            return OpKind::ListEnd;
        }
        match self.get(handle) {
            Some(op) => op.kind(),
            None => panic!("AssertionError: op {handle:?} is not in this list"),
        }
    }
}

impl<T> Default for OpList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the handles of an `OpList`, skipping sentinels.
pub struct Handles<'a, T> {
    list: &'a OpList<T>,
    cursor: OpHandle,
}

impl<T> Iterator for Handles<'_, T> {
    type Item = OpHandle;

    fn next(&mut self) -> Option<OpHandle> {
        if self.list.is_list_end(self.cursor) {
            return None;
        }
        let current = self.cursor;
        self.cursor = self.list.next(current);
        Some(current)
    }
}

/// Forward iterator over the ops of an `OpList`.
pub struct Iter<'a, T> {
    handles: Handles<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let list = self.handles.list;
        self.handles.next().and_then(|handle| list.get(handle))
    }
}

impl<T> FromIterator<T> for OpList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = OpList::new();
        list.push_all(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a OpList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Alias for CreateOp list
pub type CreateOpList = OpList<Box<dyn CreateOp + Send + Sync>>;

/// Alias for UpdateOp list
pub type UpdateOpList = OpList<Box<dyn UpdateOp + Send + Sync>>;
