use tipstate_decoder::{
    CallResult, LegacyTip, RawClaim, RawClaimGen, RawRetip, RawState, RawTip, StateResponse,
    TaggedTip, TipMeta,
};
use tipstate_types::{Amount, TokenAmount};

/// Builder for raw snapshot fixtures.
///
/// Ids are caller-supplied so tests read like the ledgers they model.
#[derive(Debug, Default)]
pub struct StateBuilder {
    contract_id: Option<String>,
    state: RawState,
}

impl StateBuilder {
    /// Snapshot without wrapper metadata (bare decoded state).
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot wrapped with the originating contract address.
    pub fn for_contract(contract_id: &str) -> Self {
        StateBuilder {
            contract_id: Some(contract_id.to_string()),
            state: RawState::default(),
        }
    }

    pub fn url(mut self, url: &str, url_id: u64) -> Self {
        self.state.urls.push((url.to_string(), url_id));
        self
    }

    pub fn tip(mut self, tip_id: u64, raw: RawTip) -> Self {
        self.state.tips.push((tip_id, raw));
        self
    }

    pub fn retip(mut self, retip_id: u64, raw: RawRetip) -> Self {
        self.state.retips.push((retip_id, raw));
        self
    }

    /// Claims ledger entry with native unclaimed amount only.
    pub fn claim(self, url_id: u64, claim_gen: u64, unclaimed: u64) -> Self {
        self.token_claim(url_id, claim_gen, unclaimed, &[])
    }

    /// Claims ledger entry with native and per-token unclaimed amounts.
    pub fn token_claim(
        mut self,
        url_id: u64,
        claim_gen: u64,
        unclaimed: u64,
        tokens: &[(&str, u64)],
    ) -> Self {
        self.state.claims.push((
            url_id,
            RawClaim {
                claim_gen,
                unclaimed_amount: Amount::from(unclaimed),
                token_unclaimed_amount: tokens
                    .iter()
                    .map(|(token, amount)| TokenAmount {
                        token: token.to_string(),
                        amount: Amount::from(*amount),
                    })
                    .collect(),
            },
        ));
        self
    }

    pub fn build(self) -> StateResponse {
        StateResponse {
            result: self.contract_id.map(|contract_id| CallResult { contract_id }),
            decoded_result: self.state,
        }
    }

    /// The snapshot as raw JSON, for tests entering through the
    /// `serde_json::Value` path.
    pub fn build_value(self) -> serde_json::Value {
        serde_json::to_value(self.build()).unwrap()
    }
}

fn meta(sender: &str, title: &str) -> TipMeta {
    TipMeta {
        sender: sender.to_string(),
        title: title.to_string(),
        timestamp: Some(1_600_000_000),
    }
}

/// Tagged native tip targeting a URL.
pub fn ae_tip(sender: &str, title: &str, url_id: u64, amount: u64, claim_gen: u64) -> RawTip {
    RawTip::Tagged(TaggedTip::AeTip(
        meta(sender, title),
        url_id,
        Amount::from(amount),
        RawClaimGen(Some(claim_gen)),
    ))
}

/// Tagged token tip targeting a URL.
pub fn token_tip(
    sender: &str,
    title: &str,
    url_id: u64,
    token: &str,
    token_amount: u64,
    claim_gen: u64,
) -> RawTip {
    RawTip::Tagged(TaggedTip::TokenTip(
        meta(sender, title),
        url_id,
        (token.to_string(), Amount::from(token_amount)),
        RawClaimGen(Some(claim_gen)),
    ))
}

/// Tagged native tip sent straight to a receiving account.
pub fn direct_ae_tip(sender: &str, title: &str, receiver: &str, amount: u64) -> RawTip {
    RawTip::Tagged(TaggedTip::DirectAeTip(
        meta(sender, title),
        receiver.to_string(),
        Amount::from(amount),
    ))
}

/// Tagged token tip sent straight to a receiving account.
pub fn direct_token_tip(
    sender: &str,
    title: &str,
    receiver: &str,
    token: &str,
    token_amount: u64,
) -> RawTip {
    RawTip::Tagged(TaggedTip::DirectTokenTip(
        meta(sender, title),
        receiver.to_string(),
        (token.to_string(), Amount::from(token_amount)),
    ))
}

/// Tagged post carrying media attachments and no value.
pub fn post_without_tip(sender: &str, title: &str, media: &[&str]) -> RawTip {
    RawTip::Tagged(TaggedTip::PostWithoutTip(
        meta(sender, title),
        media.iter().map(|entry| entry.to_string()).collect(),
    ))
}

/// Flat tip record in the earliest schema's shape.
pub fn legacy_tip(sender: &str, title: &str, url_id: u64, amount: u64, claim_gen: u64) -> RawTip {
    RawTip::Legacy(LegacyTip {
        sender: Some(sender.to_string()),
        title: Some(title.to_string()),
        timestamp: Some(1_600_000_000),
        url_id: Some(url_id),
        amount: Some(Amount::from(amount)),
        claim_gen: RawClaimGen(Some(claim_gen)),
    })
}

/// Native retip record attached to `tip_id`.
pub fn retip_record(tip_id: u64, sender: &str, amount: u64, claim_gen: u64) -> RawRetip {
    RawRetip {
        tip_id,
        sender: Some(sender.to_string()),
        amount: Some(Amount::from(amount)),
        token: None,
        token_amount: None,
        claim_gen: RawClaimGen(Some(claim_gen)),
    }
}

/// Token retip record attached to `tip_id`.
pub fn token_retip_record(
    tip_id: u64,
    sender: &str,
    token: &str,
    token_amount: u64,
    claim_gen: u64,
) -> RawRetip {
    RawRetip {
        tip_id,
        sender: Some(sender.to_string()),
        amount: None,
        token: Some(token.to_string()),
        token_amount: Some(Amount::from(token_amount)),
        claim_gen: RawClaimGen(Some(claim_gen)),
    }
}
