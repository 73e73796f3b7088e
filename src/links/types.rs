//! Link type definitions.
//!
//! Profiles and addressing payloads written to the genesis link address
//! file. A physical link is one `LinkAddress` shared by a creator-side and a
//! loader-side `LinkProfile`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Description tag carried by every genesis link profile
pub const LINK_DESCRIPTION: &str = "link_type: bidirectional";

/// Mapping of node id to the link profiles that node loads at startup
pub type LinkAddressMap = BTreeMap<String, Vec<LinkProfile>>;

/// Which side of a link a node plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkRole {
    /// Authors the shared storage objects
    Creator,
    /// Loads storage objects created by the counterpart
    Loader,
}

/// Canonical (creator, loader) ordering of an unordered node pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkPair {
    pub creator: String,
    pub loader: String,
}

impl LinkPair {
    pub fn new(creator: &str, loader: &str) -> Self {
        Self {
            creator: creator.to_string(),
            loader: loader.to_string(),
        }
    }
}

/// Storage addressing for one bidirectional link.
///
/// The creator fetches from `fetchBucket`/`initialFetchObjUuid` and posts to
/// `postBucket`/`initialPostObjUuid`; the loader does the opposite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkAddress {
    pub region: String,
    pub fetch_bucket: String,
    pub initial_fetch_obj_uuid: String,
    pub post_bucket: String,
    pub initial_post_obj_uuid: String,
    #[serde(default = "default_open_objects")]
    pub open_objects: u32,
    #[serde(default = "default_max_tries")]
    pub max_tries: u32,
}

fn default_open_objects() -> u32 {
    1
}

fn default_max_tries() -> u32 {
    120
}

/// One node's view of a link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkProfile {
    pub role: LinkRole,
    /// The single counterpart node
    pub personas: Vec<String>,
    /// Written as a JSON-encoded string, identical on both sides of the link
    #[serde(with = "address_string")]
    pub address: Arc<LinkAddress>,
    pub description: String,
}

impl LinkProfile {
    pub fn counterpart(&self) -> Option<&str> {
        self.personas.first().map(String::as_str)
    }
}

mod address_string {
    use super::LinkAddress;
    use serde::{de, ser, Deserialize, Deserializer, Serializer};
    use std::sync::Arc;

    pub fn serialize<S>(address: &Arc<LinkAddress>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let encoded = serde_json::to_string(address.as_ref()).map_err(<S::Error as ser::Error>::custom)?;
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Arc<LinkAddress>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        serde_json::from_str(&encoded)
            .map(Arc::new)
            .map_err(<D::Error as de::Error>::custom)
    }
}
