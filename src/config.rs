use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Channel this generator is authoritative for
pub const CHANNEL_ID: &str = "skyhookBasicComposition";

/// Range config describing the physical network
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RangeConfig {
    pub range: Range,
}

/// Body of a range config
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Range {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "RACE_nodes")]
    pub race_nodes: Vec<RangeNode>,
}

/// A single node entry in the range config
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RangeNode {
    pub name: String,
    /// Free-form node type, e.g. "RACE linux client"
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
}

impl RangeNode {
    /// Convenience constructor for a node without an explicit type
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            node_type: None,
        }
    }
}

impl RangeConfig {
    /// Build a range config from bare node names
    pub fn from_node_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            range: Range {
                name: None,
                race_nodes: names.into_iter().map(|n| RangeNode::named(n.as_ref())).collect(),
            },
        }
    }
}

/// Links requested by network manager
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct NmRequest {
    pub links: Vec<RequestedLink>,
}

/// One directional link request
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RequestedLink {
    pub sender: String,
    pub recipients: Vec<String>,
    pub channels: Vec<String>,
    /// Fields we do not interpret, carried through to the fulfilled record
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl RequestedLink {
    pub fn new(sender: &str, recipient: &str, channels: &[&str]) -> Self {
        Self {
            sender: sender.to_string(),
            recipients: vec![recipient.to_string()],
            channels: channels.iter().map(|c| c.to_string()).collect(),
            extra: BTreeMap::new(),
        }
    }

    /// The recipient, if there is exactly one
    pub fn single_recipient(&self) -> Option<&str> {
        match self.recipients.as_slice() {
            [recipient] => Some(recipient.as_str()),
            _ => None,
        }
    }

    pub fn offers_channel(&self, channel_id: &str) -> bool {
        self.channels.iter().any(|c| c == channel_id)
    }

    /// Copy of this request with the channel list reduced to `channel_id`
    pub fn narrowed_to(&self, channel_id: &str) -> Self {
        Self {
            channels: vec![channel_id.to_string()],
            ..self.clone()
        }
    }
}

/// Storage material placed into every synthesized link address
#[derive(Debug, Clone, PartialEq)]
pub struct StorageSettings {
    pub region: String,
    pub fetch_bucket: String,
    pub post_bucket: String,
    pub open_objects: u32,
    pub max_tries: u32,
}

/// Settings injected into one generation run
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub channel_id: String,
    pub storage: StorageSettings,
    /// Leave server-to-server requests unclaimed
    pub disable_s2s: bool,
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid range configuration: {0}")]
    InvalidRange(String),
    #[error("Invalid NM request: {0}")]
    InvalidRequest(String),
}

/// Default implementations
impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            fetch_bucket: "<YOUR-BUCKET>/<YOUR-FETCH-OBJECT>".to_string(),
            post_bucket: "<YOUR-BUCKET>/<YOUR-POST-OBJECT>".to_string(),
            open_objects: 1,
            max_tries: 120,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            channel_id: CHANNEL_ID.to_string(),
            storage: StorageSettings::default(),
            disable_s2s: false,
        }
    }
}
