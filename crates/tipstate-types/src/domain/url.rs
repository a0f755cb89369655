use serde::{Deserialize, Serialize};

use crate::amount::{Amount, TokenAmount};
use crate::domain::tip::Tip;

/// Per-URL view over all tips and retips targeting it.
///
/// `unclaimed_amount` and `token_unclaimed_amount` come straight from the
/// claims ledger, which is authoritative for payouts; totals derived from
/// individual tips are an informational cross-check only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlSummary {
    pub url: String,
    pub tip_ids: Vec<String>,
    pub retip_ids: Vec<String>,
    pub unclaimed_amount: Amount,
    pub token_unclaimed_amount: Vec<TokenAmount>,
}

/// Normalized view over one or more contract state snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateView {
    pub urls: Vec<UrlSummary>,
    pub tips: Vec<Tip>,
}
