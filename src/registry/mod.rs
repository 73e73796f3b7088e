//! # Node Registry
//!
//! The registry is built once from the range config and answers the two
//! questions the link generator asks about a node: does it exist, and is it
//! a client or a server.
//!
//! ## Classification
//!
//! A node's class is resolved when the registry is built, never re-derived
//! per lookup:
//!
//! 1. An explicit `type` field containing `client` or `server` wins
//!    (e.g. `"RACE linux client"`).
//! 2. Otherwise the identifier convention applies: ids containing `client`
//!    are clients, everything else is a server.
//!
//! ## Example
//!
//! ```
//! use skyhook_linkgen::config::RangeConfig;
//! use skyhook_linkgen::registry::{NodeClass, NodeRegistry};
//!
//! let range = RangeConfig::from_node_names(["race-client-00001", "race-server-00001"]);
//! let registry = NodeRegistry::from_range_config(&range).unwrap();
//!
//! assert_eq!(registry.class_of("race-client-00001"), Some(NodeClass::Client));
//! assert_eq!(registry.class_of("race-server-00001"), Some(NodeClass::Server));
//! ```

use crate::config::{RangeConfig, ValidationError};
use serde::Serialize;
use std::collections::HashMap;

/// Client/server classification of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeClass {
    Client,
    Server,
}

impl NodeClass {
    /// Classify from the identifier convention alone
    pub fn from_identifier(id: &str) -> Self {
        if id.contains("client") {
            NodeClass::Client
        } else {
            NodeClass::Server
        }
    }

    /// Classify from an optional explicit type, falling back to the identifier
    pub fn resolve(id: &str, node_type: Option<&str>) -> Self {
        match node_type.map(str::to_lowercase) {
            Some(t) if t.contains("client") => NodeClass::Client,
            Some(t) if t.contains("server") => NodeClass::Server,
            _ => Self::from_identifier(id),
        }
    }

    pub fn is_client(self) -> bool {
        self == NodeClass::Client
    }
}

/// A node known to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredNode {
    pub id: String,
    pub class: NodeClass,
}

/// Set of valid node ids, in range config order
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    nodes: Vec<RegisteredNode>,
    index: HashMap<String, usize>,
}

impl NodeRegistry {
    /// Build the registry, rejecting empty or duplicate node names
    pub fn from_range_config(range_config: &RangeConfig) -> Result<Self, ValidationError> {
        let mut registry = NodeRegistry::default();

        for node in &range_config.range.race_nodes {
            if node.name.trim().is_empty() {
                return Err(ValidationError::InvalidRange(
                    "node name cannot be empty".to_string(),
                ));
            }
            if registry.index.contains_key(&node.name) {
                return Err(ValidationError::InvalidRange(format!(
                    "duplicate node name '{}'",
                    node.name
                )));
            }

            let class = NodeClass::resolve(&node.name, node.node_type.as_deref());
            registry.index.insert(node.name.clone(), registry.nodes.len());
            registry.nodes.push(RegisteredNode {
                id: node.name.clone(),
                class,
            });
        }

        log::debug!(
            "Node registry: {} clients, {} servers",
            registry.clients().count(),
            registry.servers().count()
        );

        Ok(registry)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn class_of(&self, id: &str) -> Option<NodeClass> {
        self.index.get(id).map(|&i| self.nodes[i].class)
    }

    /// Class of a node, using the identifier convention for unknown ids
    pub fn class_or_convention(&self, id: &str) -> NodeClass {
        self.class_of(id)
            .unwrap_or_else(|| NodeClass::from_identifier(id))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &RegisteredNode> {
        self.nodes.iter()
    }

    pub fn clients(&self) -> impl Iterator<Item = &RegisteredNode> {
        self.nodes.iter().filter(|n| n.class == NodeClass::Client)
    }

    pub fn servers(&self) -> impl Iterator<Item = &RegisteredNode> {
        self.nodes.iter().filter(|n| n.class == NodeClass::Server)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
