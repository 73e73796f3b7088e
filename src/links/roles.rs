//! Creator/loader role assignment.

use crate::links::types::LinkPair;
use crate::registry::NodeRegistry;

/// Decide which side of a requested link creates and which loads.
///
/// Priority order:
/// 1. A client sender loads, the recipient creates
/// 2. A client recipient loads, the sender creates
/// 3. Between two servers the lexicographically smaller id creates
///
/// The result depends only on the unordered pair, so both directions of a
/// server-to-server request map to the same `LinkPair`.
pub fn resolve_roles(registry: &NodeRegistry, sender: &str, recipient: &str) -> LinkPair {
    if registry.class_or_convention(sender).is_client() {
        LinkPair::new(recipient, sender)
    } else if registry.class_or_convention(recipient).is_client() {
        LinkPair::new(sender, recipient)
    } else if sender <= recipient {
        LinkPair::new(sender, recipient)
    } else {
        LinkPair::new(recipient, sender)
    }
}
