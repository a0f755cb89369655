use serde::{Deserialize, Serialize};

use crate::amount::{Amount, TokenAmount};

/// Kind of a normalized tip, one constructor per variant the contract
/// family ever introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipKind {
    AeTip,
    TokenTip,
    DirectAeTip,
    DirectTokenTip,
    PostWithoutTip,
}

/// Claim status of a tip or retip, resolved against its URL's claims
/// ledger entry at snapshot time.
///
/// `unclaimed_amount` and `token_unclaimed_amount` are URL-scoped ledger
/// totals, not per-contributor amounts. A record is unclaimed exactly when
/// its own recorded generation is strictly greater than the ledger
/// generation; partial settlement inside one generation is not modeled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimInfo {
    pub unclaimed: bool,
    pub claim_gen: u64,
    pub unclaimed_amount: Amount,
    pub token_unclaimed_amount: Vec<TokenAmount>,
}

/// An additional pledge attached to an existing tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retip {
    pub id: String,
    pub tip_id: String,
    pub sender: Option<String>,
    pub amount: Amount,
    pub token: Option<String>,
    pub token_amount: Amount,
    pub claim_gen: Option<u64>,
    pub claim: Option<ClaimInfo>,
}

/// A fully normalized tip: the decoded variant payload plus resolved URL,
/// retips, claim status, and aggregate amounts.
///
/// Direct tips and posts have no URL: `url`, `retips`, and `claim` stay
/// null and the claimable totals stay zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    /// Version-qualified identifier, e.g. `"3_v2"`.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TipKind,
    /// Originating contract address, when the snapshot wrapper carried one.
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    pub sender: Option<String>,
    pub title: Option<String>,
    pub timestamp: Option<u64>,
    /// Media attachments; only posts carry them.
    pub media: Option<Vec<String>>,
    /// Receiving account; only direct tips carry one.
    pub receiver: Option<String>,
    pub url: Option<String>,
    pub url_id: Option<u64>,
    /// Native amount; zero for token-denominated tips.
    pub amount: Amount,
    pub token: Option<String>,
    pub token_amount: Amount,
    pub claim_gen: Option<u64>,
    pub retips: Option<Vec<Retip>>,
    pub claim: Option<ClaimInfo>,
    pub total_amount: Amount,
    pub total_unclaimed_amount: Amount,
    pub total_claimed_amount: Amount,
    pub token_total_amount: Vec<TokenAmount>,
    pub token_total_unclaimed_amount: Vec<TokenAmount>,
    pub token_total_claimed_amount: Vec<TokenAmount>,
}

impl Tip {
    /// Whether this tip can ever carry claimable value (targets a URL).
    pub fn is_claimable(&self) -> bool {
        self.url_id.is_some()
    }
}
