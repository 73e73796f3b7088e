//! Input document validation.
//!
//! This module provides consistency checks for the range config and the NM
//! request before link generation runs. Recipient counts are deliberately
//! not checked here; the fulfillment engine owns that rule.

use crate::config::{NmRequest, ValidationError};
use crate::registry::NodeRegistry;

/// Validate the node registry derived from a range config
///
/// Checks for:
/// - At least one node
/// - At least one client, unless `allow_no_clients` is set
///
/// # Examples
/// ```
/// use skyhook_linkgen::config::RangeConfig;
/// use skyhook_linkgen::registry::NodeRegistry;
/// use skyhook_linkgen::utils::validation::validate_range_config;
///
/// let registry = NodeRegistry::from_range_config(&RangeConfig::from_node_names(["server-1"])).unwrap();
/// assert!(validate_range_config(&registry, true).is_ok());
/// assert!(validate_range_config(&registry, false).is_err());
/// ```
pub fn validate_range_config(registry: &NodeRegistry, allow_no_clients: bool) -> Result<(), ValidationError> {
    if registry.is_empty() {
        return Err(ValidationError::InvalidRange(
            "range config contains no nodes".to_string(),
        ));
    }

    let clients = registry.clients().count();
    if clients == 0 && !allow_no_clients {
        return Err(ValidationError::InvalidRange(
            "range config contains no client nodes".to_string(),
        ));
    }

    log::info!(
        "Range config: {} nodes ({} clients, {} servers)",
        registry.len(),
        clients,
        registry.len() - clients
    );

    Ok(())
}

/// Validate an NM request against the range config
///
/// Checks for:
/// - Senders and recipients that are nodes in the range config
/// - Links that offer at least one channel
pub fn validate_nm_request(request: &NmRequest, registry: &NodeRegistry) -> Result<(), ValidationError> {
    for (index, link) in request.links.iter().enumerate() {
        if !registry.contains(&link.sender) {
            return Err(ValidationError::InvalidRequest(format!(
                "link #{}: sender '{}' is not in the range config",
                index, link.sender
            )));
        }

        if let Some(unknown) = link.recipients.iter().find(|r| !registry.contains(r)) {
            return Err(ValidationError::InvalidRequest(format!(
                "link #{}: recipient '{}' is not in the range config",
                index, unknown
            )));
        }

        if link.channels.is_empty() {
            return Err(ValidationError::InvalidRequest(format!(
                "link #{}: no channels offered",
                index
            )));
        }
    }

    if request.links.is_empty() {
        log::warn!("NM request contains no links");
    }

    Ok(())
}
