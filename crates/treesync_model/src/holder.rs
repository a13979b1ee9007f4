//! Internal tree nodes.

use crate::object::DataObject;
use crate::status::UpdateStatus;
use parking_lot::RwLock;
use std::sync::Arc;

/// A child of a [`DataHolder`]: either a leaf value or a nested
/// holder.
#[derive(Debug, Clone)]
pub enum DataNode {
    /// A leaf value.
    Leaf(DataObject),
    /// A nested holder.
    Holder(Arc<DataHolder>),
}

impl DataNode {
    /// The child's name within its parent: the leaf's name or the
    /// holder's identifier.
    pub fn name(&self) -> &str {
        match self {
            DataNode::Leaf(object) => object.name(),
            DataNode::Holder(holder) => holder.identifier(),
        }
    }
}

/// An internal node of the data tree.
///
/// Holds an insertion-ordered set of uniquely named children, an
/// optional fallback object (returned when the holder must stand in
/// for a resolved value), and a per-peer [`UpdateStatus`]. The child
/// list is guarded by a lock so that mutations are serialized per
/// holder and a resolution pass sees a consistent snapshot.
///
/// Ownership is strictly hierarchical: a holder must never be
/// inserted into its own subtree.
#[derive(Debug)]
pub struct DataHolder {
    identifier: String,
    fallback: RwLock<Option<DataObject>>,
    children: RwLock<Vec<DataNode>>,
    status: UpdateStatus,
}

impl DataHolder {
    /// Creates an empty holder.
    ///
    /// Holders are handed out behind `Arc` so that nested holders and
    /// on-demand wrappers can share them.
    pub fn new(identifier: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            identifier: identifier.into(),
            fallback: RwLock::new(None),
            children: RwLock::new(Vec::new()),
            status: UpdateStatus::new(),
        })
    }

    /// The holder's identifier, doubling as its name when wrapped.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The per-peer staleness tracker for this subtree.
    pub fn status(&self) -> &UpdateStatus {
        &self.status
    }

    /// Sets the object that stands in for this holder on the degraded
    /// enumeration path.
    pub fn set_fallback(&self, object: DataObject) {
        *self.fallback.write() = Some(object);
    }

    /// The holder's fallback object, if one is set.
    pub fn fallback(&self) -> Option<DataObject> {
        self.fallback.read().clone()
    }

    /// Inserts a leaf child, replacing any child of the same name.
    pub fn insert_leaf(&self, object: DataObject) {
        self.insert(DataNode::Leaf(object));
    }

    /// Inserts a nested holder, replacing any child of the same name.
    pub fn insert_holder(&self, holder: Arc<DataHolder>) {
        self.insert(DataNode::Holder(holder));
    }

    fn insert(&self, node: DataNode) {
        let mut children = self.children.write();
        match children.iter().position(|c| c.name() == node.name()) {
            Some(position) => children[position] = node,
            None => children.push(node),
        }
        drop(children);
        self.status.mark_changed();
    }

    /// Looks up a child by name.
    pub fn get(&self, name: &str) -> Option<DataNode> {
        self.children
            .read()
            .iter()
            .find(|c| c.name() == name)
            .cloned()
    }

    /// Removes and returns a child by name. The removed subtree is
    /// dropped when the caller lets go of it.
    pub fn remove(&self, name: &str) -> Option<DataNode> {
        let mut children = self.children.write();
        let position = children.iter().position(|c| c.name() == name)?;
        let node = children.remove(position);
        drop(children);
        self.status.mark_changed();
        Some(node)
    }

    /// Removes every child. Used by wrapper deletion to tear down a
    /// subtree addressed as a single value.
    pub fn clear(&self) {
        self.children.write().clear();
        self.status.mark_changed();
    }

    /// A consistent copy of the child list, in insertion order.
    pub fn snapshot(&self) -> Vec<DataNode> {
        self.children.read().clone()
    }

    /// The child names, in insertion order.
    pub fn child_names(&self) -> Vec<String> {
        self.children
            .read()
            .iter()
            .map(|c| c.name().to_owned())
            .collect()
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.read().len()
    }

    /// Returns true when the holder has no children.
    pub fn is_empty(&self) -> bool {
        self.children.read().is_empty()
    }
}
