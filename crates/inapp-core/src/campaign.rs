//! Campaign id validation.

use serde_json::{Map, Value};

use crate::protocol::lenient::opt_i64;

/// Decides which campaign ids are kept on parse and emitted on serialize.
pub trait CampaignIdValidator {
    /// Read `key` from `payload`; `None` when missing, unreadable, or invalid.
    fn retrieve_valid_or_absent(&self, payload: &Map<String, Value>, key: &str) -> Option<i64> {
        opt_i64(payload, key).filter(|id| self.is_valid(*id))
    }

    fn is_valid(&self, campaign_id: i64) -> bool;
}

/// Accepts any non-negative id.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCampaignIds;

impl CampaignIdValidator for DefaultCampaignIds {
    fn is_valid(&self, campaign_id: i64) -> bool {
        campaign_id >= 0
    }
}
