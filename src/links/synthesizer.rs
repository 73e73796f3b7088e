//! Link address and profile synthesis.
//!
//! A bidirectional link is two independently addressed one-way channels.
//! Object ids are derived from the ordered pair so either side can recompute
//! them from its own role and counterpart:
//!
//! - fetch: `fetch-{creator}-{loader}`
//! - post: `post-{loader}-{creator}`

use crate::config::StorageSettings;
use crate::links::types::{LinkAddress, LinkPair, LinkProfile, LinkRole, LINK_DESCRIPTION};
use std::sync::Arc;

/// Result of synthesizing one physical link
#[derive(Debug, Clone)]
pub struct SynthesizedLink {
    pub creator_profile: LinkProfile,
    pub loader_profile: LinkProfile,
}

/// Initial object id for creator-to-loader traffic
pub fn fetch_object_id(creator: &str, loader: &str) -> String {
    format!("fetch-{}-{}", creator, loader)
}

/// Initial object id for loader-to-creator traffic
pub fn post_object_id(creator: &str, loader: &str) -> String {
    format!("post-{}-{}", loader, creator)
}

/// Builds link material using the injected storage settings
#[derive(Debug, Clone)]
pub struct LinkSynthesizer<'a> {
    storage: &'a StorageSettings,
}

impl<'a> LinkSynthesizer<'a> {
    pub fn new(storage: &'a StorageSettings) -> Self {
        Self { storage }
    }

    pub fn address_for(&self, pair: &LinkPair) -> LinkAddress {
        LinkAddress {
            region: self.storage.region.clone(),
            fetch_bucket: self.storage.fetch_bucket.clone(),
            initial_fetch_obj_uuid: fetch_object_id(&pair.creator, &pair.loader),
            post_bucket: self.storage.post_bucket.clone(),
            initial_post_obj_uuid: post_object_id(&pair.creator, &pair.loader),
            open_objects: self.storage.open_objects,
            max_tries: self.storage.max_tries,
        }
    }

    pub fn synthesize(&self, pair: &LinkPair) -> SynthesizedLink {
        let address = Arc::new(self.address_for(pair));

        let creator_profile = LinkProfile {
            role: LinkRole::Creator,
            personas: vec![pair.loader.clone()],
            address: Arc::clone(&address),
            description: LINK_DESCRIPTION.to_string(),
        };
        let loader_profile = LinkProfile {
            role: LinkRole::Loader,
            personas: vec![pair.creator.clone()],
            address,
            description: LINK_DESCRIPTION.to_string(),
        };

        SynthesizedLink {
            creator_profile,
            loader_profile,
        }
    }
}
