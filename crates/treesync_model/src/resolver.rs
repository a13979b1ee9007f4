//! Selector resolution over the data tree.

use crate::error::{ModelResult, ResolveError};
use crate::holder::{DataHolder, DataNode};
use crate::object::DataObject;
use std::sync::Arc;
use tracing::{debug, error};
use treesync_protocol::WireBuf;

/// A holder adapted to the leaf interface.
///
/// Lets a caller address a whole subtree as if it were a single
/// value: the wrapper's name is the holder's identifier and deleting
/// it tears the subtree down. Created on demand during resolution,
/// never persisted in the tree.
#[derive(Debug, Clone)]
pub struct HolderWrapper {
    holder: Arc<DataHolder>,
}

impl HolderWrapper {
    /// Wraps a holder.
    pub fn new(holder: Arc<DataHolder>) -> Self {
        Self { holder }
    }

    /// The wrapped holder's identifier.
    pub fn name(&self) -> &str {
        self.holder.identifier()
    }

    /// The wrapped holder.
    pub fn holder(&self) -> &Arc<DataHolder> {
        &self.holder
    }

    /// Tears down the wrapped subtree.
    pub fn delete(&self) {
        self.holder.clear();
    }
}

/// One element of a resolution result: a leaf value, or a holder
/// standing in as one.
#[derive(Debug, Clone)]
pub enum ResolvedObject {
    /// A leaf value.
    Leaf(DataObject),
    /// A wrapped holder.
    Wrapped(HolderWrapper),
}

impl ResolvedObject {
    /// The element's name on the wire.
    pub fn name(&self) -> &str {
        match self {
            ResolvedObject::Leaf(object) => object.name(),
            ResolvedObject::Wrapped(wrapper) => wrapper.name(),
        }
    }

    /// The element's payload; empty for wrapped holders.
    pub fn value(&self) -> &str {
        match self {
            ResolvedObject::Leaf(object) => object.value(),
            ResolvedObject::Wrapped(_) => "",
        }
    }
}

/// Resolves a selector expression against a holder into the ordered
/// list of objects it denotes.
///
/// The selector is `explicit` when given, otherwise one string token
/// read from `buf`. A selector is a bare name, `"*"` (every direct
/// child), `"*u"` (children changed for `peer`, plus all leaves), or
/// a comma-separated list of names.
///
/// When `wrap_holders` is true a matched holder is returned as a
/// [`HolderWrapper`] instead of being expanded.
///
/// Failure handling is deliberately lopsided: a buffer read failure
/// degrades to enumerating the holder's direct children and a failed
/// nested expansion degrades to a single wrapper, but a direct name
/// miss fails the call (and any comma-list containing it). A peer
/// that is out of sync gets *something* usable back; only an
/// unresolvable name is the caller's problem.
pub fn resolve(
    peer: &str,
    holder: &Arc<DataHolder>,
    explicit: Option<&str>,
    buf: &mut WireBuf,
    wrap_holders: bool,
) -> ModelResult<Vec<ResolvedObject>> {
    let mut out = Vec::new();
    resolve_into(peer, holder, explicit, buf, wrap_holders, &mut out)?;
    Ok(out)
}

fn resolve_into(
    peer: &str,
    holder: &Arc<DataHolder>,
    explicit: Option<&str>,
    buf: &mut WireBuf,
    wrap_holders: bool,
    out: &mut Vec<ResolvedObject>,
) -> ModelResult<()> {
    let selector = match explicit {
        Some(s) => s.to_owned(),
        None => match buf.read_string() {
            Ok(s) => s,
            Err(err) => {
                // Malformed selector from a possibly out-of-sync
                // peer: spit out everything in the holder instead.
                debug!(
                    holder = holder.identifier(),
                    %err,
                    "selector read failed, enumerating holder"
                );
                enumerate_children(holder, wrap_holders, out);
                return Ok(());
            }
        },
    };

    let selector = if selector == "*" {
        let expanded = holder.child_names().join(",");
        if expanded.is_empty() {
            return Ok(());
        }
        expanded
    } else if selector == "*u" {
        let expanded = expand_changed_only(peer, holder);
        if expanded.is_empty() {
            return Ok(());
        }
        expanded
    } else {
        selector
    };

    if selector.contains(',') {
        for piece in selector.split(',') {
            let nested = resolve(peer, holder, Some(piece), buf, false)?;
            out.extend(nested);
        }
        return Ok(());
    }

    match holder.get(&selector) {
        None => {
            error!(
                name = %selector,
                holder = holder.identifier(),
                "selector name not found"
            );
            Err(ResolveError::NameNotFound {
                name: selector,
                holder: holder.identifier().to_owned(),
            })
        }
        Some(DataNode::Leaf(object)) => {
            out.push(ResolvedObject::Leaf(object));
            Ok(())
        }
        Some(DataNode::Holder(child)) => {
            if wrap_holders {
                out.push(ResolvedObject::Wrapped(HolderWrapper::new(child)));
            } else {
                // The nested call reads its own selector token from
                // the same buffer; an exhausted buffer makes it
                // enumerate the child's children. A failed expansion
                // degrades to a single wrapper rather than failing
                // the whole call.
                match resolve(peer, &child, None, buf, false) {
                    Ok(nested) => out.extend(nested),
                    Err(_) => out.push(ResolvedObject::Wrapped(HolderWrapper::new(child))),
                }
            }
            Ok(())
        }
    }
}

/// Expands `"*u"`: identifiers of sub-holders stale for `peer`, plus
/// every leaf name unconditionally, in child order.
fn expand_changed_only(peer: &str, holder: &Arc<DataHolder>) -> String {
    let mut names = Vec::new();
    for child in holder.snapshot() {
        match child {
            DataNode::Holder(h) => {
                if h.status().needs_update(peer) {
                    names.push(h.identifier().to_owned());
                }
            }
            DataNode::Leaf(object) => names.push(object.name().to_owned()),
        }
    }
    names.join(",")
}

/// The degraded path: every direct child of the holder, leaves as-is
/// and sub-holders as their fallback object (or a wrapper when
/// wrapping is requested or no fallback is set).
fn enumerate_children(
    holder: &Arc<DataHolder>,
    wrap_holders: bool,
    out: &mut Vec<ResolvedObject>,
) {
    for child in holder.snapshot() {
        match child {
            DataNode::Leaf(object) => out.push(ResolvedObject::Leaf(object)),
            DataNode::Holder(h) => {
                if wrap_holders {
                    out.push(ResolvedObject::Wrapped(HolderWrapper::new(h)));
                } else if let Some(fallback) = h.fallback() {
                    out.push(ResolvedObject::Leaf(fallback));
                } else {
                    out.push(ResolvedObject::Wrapped(HolderWrapper::new(h)));
                }
            }
        }
    }
}
