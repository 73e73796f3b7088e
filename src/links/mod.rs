//! Genesis link fulfillment.
//!
//! This module turns a requested-link list into the per-node link
//! profiles each node is preloaded with, and records which requests the
//! channel took responsibility for.

pub mod types;
pub mod roles;
pub mod dedup;
pub mod synthesizer;
pub mod fulfillment;
pub mod engine;

// Re-export key types and functions for easier access
pub use types::{LinkAddress, LinkAddressMap, LinkPair, LinkProfile, LinkRole, LINK_DESCRIPTION};
pub use roles::resolve_roles;
pub use dedup::PairDeduplicator;
pub use synthesizer::{LinkSynthesizer, SynthesizedLink};
pub use fulfillment::{FulfillmentStatus, FulfillmentTracker};
pub use engine::{GenesisLinks, LinkError, LinkFulfillmentEngine};
