//! Accounting of which requested links this channel claimed.

use crate::config::{NmRequest, RequestedLink};
use log::{info, warn};

/// Outcome of one fulfillment pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FulfillmentStatus {
    /// Every requested link was claimed
    Complete,
    /// Some requests were left for other channels
    Partial { fulfilled: usize, requested: usize },
}

impl FulfillmentStatus {
    pub fn shortfall(&self) -> usize {
        match self {
            FulfillmentStatus::Complete => 0,
            FulfillmentStatus::Partial { fulfilled, requested } => requested - fulfilled,
        }
    }
}

/// Accumulates the channel-narrowed requests claimed during a pass.
///
/// Claims are recorded per request, so several requests collapsing onto
/// one physical link each count as fulfilled.
#[derive(Debug)]
pub struct FulfillmentTracker {
    channel_id: String,
    requested: usize,
    fulfilled: Vec<RequestedLink>,
}

impl FulfillmentTracker {
    pub fn new(channel_id: &str, requested: usize) -> Self {
        Self {
            channel_id: channel_id.to_string(),
            requested,
            fulfilled: Vec::new(),
        }
    }

    pub fn record(&mut self, link: &RequestedLink) {
        self.fulfilled.push(link.narrowed_to(&self.channel_id));
    }

    pub fn fulfilled_count(&self) -> usize {
        self.fulfilled.len()
    }

    pub fn status(&self) -> FulfillmentStatus {
        if self.fulfilled.len() < self.requested {
            FulfillmentStatus::Partial {
                fulfilled: self.fulfilled.len(),
                requested: self.requested,
            }
        } else {
            FulfillmentStatus::Complete
        }
    }

    /// Log the outcome of the pass and return it
    pub fn report(&self) -> FulfillmentStatus {
        let status = self.status();
        match status {
            FulfillmentStatus::Complete => info!("All requested links fulfilled"),
            FulfillmentStatus::Partial { fulfilled, requested } => warn!(
                "Not all links fulfilled: {} of {} fulfilled ({} left for other channels)",
                fulfilled,
                requested,
                status.shortfall()
            ),
        }
        status
    }

    pub fn into_record(self) -> NmRequest {
        NmRequest {
            links: self.fulfilled,
        }
    }
}
