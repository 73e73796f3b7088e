//! Link fulfillment engine.
//!
//! Walks the requested links once, in request order, and produces the
//! genesis link address map together with the fulfilled-request record.

use crate::config::{GenerationSettings, NmRequest, RequestedLink};
use crate::links::dedup::PairDeduplicator;
use crate::links::fulfillment::{FulfillmentStatus, FulfillmentTracker};
use crate::links::roles::resolve_roles;
use crate::links::synthesizer::LinkSynthesizer;
use crate::links::types::LinkAddressMap;
use crate::registry::NodeRegistry;
use log::{debug, info};

/// Errors raised while fulfilling a link request
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LinkError {
    #[error(
        "Malformed link request #{index} from '{sender}': {} recipients given, exactly one is required",
        .recipients.len()
    )]
    MalformedRequest {
        index: usize,
        sender: String,
        recipients: Vec<String>,
    },
}

/// Everything one fulfillment pass produces
#[derive(Debug, Clone, PartialEq)]
pub struct GenesisLinks {
    pub link_addresses: LinkAddressMap,
    pub fulfilled: NmRequest,
    pub status: FulfillmentStatus,
    /// Number of physical links synthesized
    pub links_created: usize,
}

/// Mutable state owned by a single `run`
struct GenesisBuilder<'a> {
    synthesizer: LinkSynthesizer<'a>,
    link_addresses: LinkAddressMap,
    dedup: PairDeduplicator,
    tracker: FulfillmentTracker,
}

/// Fulfills NM requests for one channel against one range config
#[derive(Debug)]
pub struct LinkFulfillmentEngine<'a> {
    registry: &'a NodeRegistry,
    settings: &'a GenerationSettings,
}

impl<'a> LinkFulfillmentEngine<'a> {
    pub fn new(registry: &'a NodeRegistry, settings: &'a GenerationSettings) -> Self {
        Self { registry, settings }
    }

    /// Run one fulfillment pass over `request`.
    ///
    /// Every request must name exactly one recipient; otherwise the pass
    /// fails with `LinkError::MalformedRequest` before any link is built.
    pub fn run(&self, request: &NmRequest) -> Result<GenesisLinks, LinkError> {
        let requests = single_recipient_requests(request)?;
        let channel_id = self.settings.channel_id.as_str();

        let mut builder = GenesisBuilder {
            synthesizer: LinkSynthesizer::new(&self.settings.storage),
            link_addresses: self
                .registry
                .nodes()
                .map(|node| (node.id.clone(), Vec::new()))
                .collect(),
            dedup: PairDeduplicator::new(),
            tracker: FulfillmentTracker::new(channel_id, request.links.len()),
        };

        for (link, recipient) in requests {
            if !link.offers_channel(channel_id) {
                continue;
            }
            if self.settings.disable_s2s && self.is_server_to_server(&link.sender, recipient) {
                debug!("Skipping server-to-server link {} -> {}", link.sender, recipient);
                continue;
            }

            builder.tracker.record(link);

            let pair = resolve_roles(self.registry, &link.sender, recipient);
            if builder.dedup.already_linked(&pair) {
                continue;
            }

            let synthesized = builder.synthesizer.synthesize(&pair);
            debug!("Created link: creator {} <-> loader {}", pair.creator, pair.loader);
            builder
                .link_addresses
                .entry(pair.creator.clone())
                .or_default()
                .push(synthesized.creator_profile);
            builder
                .link_addresses
                .entry(pair.loader.clone())
                .or_default()
                .push(synthesized.loader_profile);
            builder.dedup.mark_linked(&pair);
        }

        let status = builder.tracker.report();
        let links_created = builder.dedup.len();
        info!(
            "Created {} physical links for {} fulfilled requests",
            links_created,
            builder.tracker.fulfilled_count()
        );

        Ok(GenesisLinks {
            link_addresses: builder.link_addresses,
            fulfilled: builder.tracker.into_record(),
            status,
            links_created,
        })
    }

    fn is_server_to_server(&self, sender: &str, recipient: &str) -> bool {
        !self.registry.class_or_convention(sender).is_client()
            && !self.registry.class_or_convention(recipient).is_client()
    }
}

/// Pair every request with its single recipient, failing on the first that has none or several
fn single_recipient_requests(request: &NmRequest) -> Result<Vec<(&RequestedLink, &str)>, LinkError> {
    request
        .links
        .iter()
        .enumerate()
        .map(|(index, link)| {
            link.single_recipient()
                .map(|recipient| (link, recipient))
                .ok_or_else(|| LinkError::MalformedRequest {
                    index,
                    sender: link.sender.clone(),
                    recipients: link.recipients.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RangeConfig, CHANNEL_ID};
    use crate::links::types::LinkRole;

    const OTHER_CHANNEL: &str = "twoSixDirectCpp";

    fn registry(names: &[&str]) -> NodeRegistry {
        NodeRegistry::from_range_config(&RangeConfig::from_node_names(names)).unwrap()
    }

    fn request(links: &[(&str, &str, &[&str])]) -> NmRequest {
        NmRequest {
            links: links
                .iter()
                .map(|(sender, recipient, channels)| RequestedLink::new(sender, recipient, channels))
                .collect(),
        }
    }

    fn counterparts(links: &GenesisLinks, node: &str) -> Vec<(LinkRole, String)> {
        links.link_addresses[node]
            .iter()
            .map(|p| (p.role, p.personas[0].clone()))
            .collect()
    }

    #[test]
    fn test_mixed_client_server_example() {
        let registry = registry(&["client-1", "server-1", "server-2"]);
        let settings = GenerationSettings::default();
        let links = LinkFulfillmentEngine::new(&registry, &settings)
            .run(&request(&[
                ("client-1", "server-1", &[CHANNEL_ID]),
                ("server-2", "server-1", &[CHANNEL_ID]),
            ]))
            .unwrap();

        assert_eq!(links.link_addresses.len(), 3);
        assert_eq!(
            counterparts(&links, "client-1"),
            vec![(LinkRole::Loader, "server-1".to_string())]
        );
        assert_eq!(
            counterparts(&links, "server-1"),
            vec![
                (LinkRole::Creator, "client-1".to_string()),
                (LinkRole::Creator, "server-2".to_string()),
            ]
        );
        assert_eq!(
            counterparts(&links, "server-2"),
            vec![(LinkRole::Loader, "server-1".to_string())]
        );
        assert_eq!(links.fulfilled.links.len(), 2);
        assert_eq!(links.links_created, 2);
        assert_eq!(links.status, FulfillmentStatus::Complete);
    }

    #[test]
    fn test_same_pair_collapses_but_each_request_fulfilled() {
        let registry = registry(&["client-1", "server-1"]);
        let settings = GenerationSettings::default();
        let links = LinkFulfillmentEngine::new(&registry, &settings)
            .run(&request(&[
                ("client-1", "server-1", &[CHANNEL_ID]),
                ("server-1", "client-1", &[CHANNEL_ID]),
                ("client-1", "server-1", &[CHANNEL_ID, OTHER_CHANNEL]),
            ]))
            .unwrap();

        assert_eq!(links.links_created, 1);
        assert_eq!(links.link_addresses["client-1"].len(), 1);
        assert_eq!(links.link_addresses["server-1"].len(), 1);
        assert_eq!(links.fulfilled.links.len(), 3);
        assert!(links
            .fulfilled
            .links
            .iter()
            .all(|l| l.channels == vec![CHANNEL_ID.to_string()]));
    }

    #[test]
    fn test_nodes_without_links_still_present() {
        let registry = registry(&["client-1", "client-2", "server-1", "server-2"]);
        let settings = GenerationSettings::default();
        let links = LinkFulfillmentEngine::new(&registry, &settings)
            .run(&request(&[("client-1", "server-1", &[CHANNEL_ID])]))
            .unwrap();

        assert_eq!(links.link_addresses.len(), 4);
        assert!(links.link_addresses["client-2"].is_empty());
        assert!(links.link_addresses["server-2"].is_empty());
    }

    #[test]
    fn test_foreign_channel_requests_skipped() {
        let registry = registry(&["client-1", "server-1", "server-2"]);
        let settings = GenerationSettings::default();
        let links = LinkFulfillmentEngine::new(&registry, &settings)
            .run(&request(&[
                ("client-1", "server-1", &[OTHER_CHANNEL]),
                ("server-1", "server-2", &[CHANNEL_ID]),
            ]))
            .unwrap();

        assert!(links.link_addresses["client-1"].is_empty());
        assert_eq!(links.fulfilled.links.len(), 1);
        assert_eq!(links.status, FulfillmentStatus::Partial { fulfilled: 1, requested: 2 });
    }

    #[test]
    fn test_multiple_recipients_rejected() {
        let registry = registry(&["client-1", "server-1", "server-2"]);
        let settings = GenerationSettings::default();
        let mut nm_request = request(&[("client-1", "server-1", &[CHANNEL_ID])]);
        let mut broadcast = RequestedLink::new("server-1", "server-2", &[CHANNEL_ID]);
        broadcast.recipients.push("client-1".to_string());
        nm_request.links.push(broadcast);

        let err = LinkFulfillmentEngine::new(&registry, &settings)
            .run(&nm_request)
            .unwrap_err();
        assert_eq!(
            err,
            LinkError::MalformedRequest {
                index: 1,
                sender: "server-1".to_string(),
                recipients: vec!["server-2".to_string(), "client-1".to_string()],
            }
        );
        assert!(err.to_string().contains("2 recipients"));
    }

    #[test]
    fn test_zero_recipients_rejected_even_for_foreign_channel() {
        let registry = registry(&["server-1"]);
        let settings = GenerationSettings::default();
        let mut link = RequestedLink::new("server-1", "server-1", &[OTHER_CHANNEL]);
        link.recipients.clear();

        let result = LinkFulfillmentEngine::new(&registry, &settings).run(&NmRequest { links: vec![link] });
        assert!(matches!(result, Err(LinkError::MalformedRequest { index: 0, .. })));
    }

    #[test]
    fn test_disable_s2s_leaves_server_links_unclaimed() {
        let registry = registry(&["client-1", "server-1", "server-2"]);
        let settings = GenerationSettings {
            disable_s2s: true,
            ..GenerationSettings::default()
        };
        let links = LinkFulfillmentEngine::new(&registry, &settings)
            .run(&request(&[
                ("client-1", "server-1", &[CHANNEL_ID]),
                ("server-1", "server-2", &[CHANNEL_ID]),
            ]))
            .unwrap();

        assert!(links.link_addresses["server-2"].is_empty());
        assert_eq!(links.links_created, 1);
        assert_eq!(links.status.shortfall(), 1);
    }

    #[test]
    fn test_runs_are_deterministic() {
        let registry = registry(&["client-1", "client-2", "server-1", "server-2", "server-3"]);
        let settings = GenerationSettings::default();
        let nm_request = request(&[
            ("client-2", "server-3", &[CHANNEL_ID]),
            ("server-3", "server-1", &[CHANNEL_ID]),
            ("client-1", "server-2", &[CHANNEL_ID, OTHER_CHANNEL]),
            ("server-1", "server-3", &[CHANNEL_ID]),
        ]);
        let engine = LinkFulfillmentEngine::new(&registry, &settings);

        let first = engine.run(&nm_request).unwrap();
        let second = engine.run(&nm_request).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first.link_addresses).unwrap(),
            serde_json::to_string(&second.link_addresses).unwrap()
        );
    }

    #[test]
    fn test_client_pair_linked_once_in_both_directions() {
        let registry = registry(&["client-1", "client-2"]);
        let settings = GenerationSettings::default();
        let links = LinkFulfillmentEngine::new(&registry, &settings)
            .run(&request(&[
                ("client-1", "client-2", &[CHANNEL_ID]),
                ("client-2", "client-1", &[CHANNEL_ID]),
            ]))
            .unwrap();

        assert_eq!(links.links_created, 1);
        assert_eq!(links.fulfilled.links.len(), 2);
        // First request decides the roles: the client sender loads
        assert_eq!(
            counterparts(&links, "client-1"),
            vec![(LinkRole::Loader, "client-2".to_string())]
        );
        assert_eq!(
            counterparts(&links, "client-2"),
            vec![(LinkRole::Creator, "client-1".to_string())]
        );
    }

    #[test]
    fn test_permuted_requests_link_same_pairs() {
        let registry = registry(&["client-1", "server-1", "server-2"]);
        let settings = GenerationSettings::default();
        let engine = LinkFulfillmentEngine::new(&registry, &settings);

        let forward = engine
            .run(&request(&[
                ("server-2", "server-1", &[CHANNEL_ID]),
                ("server-1", "server-2", &[CHANNEL_ID]),
            ]))
            .unwrap();
        let backward = engine
            .run(&request(&[
                ("server-1", "server-2", &[CHANNEL_ID]),
                ("server-2", "server-1", &[CHANNEL_ID]),
            ]))
            .unwrap();

        assert_eq!(forward.link_addresses, backward.link_addresses);
        assert_eq!(forward.fulfilled.links.len(), backward.fulfilled.links.len());
    }
}
