use tipstate_decoder::{DecodedRetip, DecodedTip, RawState, StateResponse, normalize_retip, normalize_tip};
use tipstate_types::{Amount, Error, Result, Retip, StateView, Tip, VersionTag};

use crate::claims::resolve_claim;
use crate::totals::compute_totals;
use crate::urls::build_url_index;

/// Normalize one raw snapshot into a consistent, typed view.
///
/// The snapshot is read-only input; every record in the returned view is
/// freshly constructed, so concurrent callers may share a cached snapshot
/// and repeated calls yield identical output.
pub fn aggregate_state(response: &StateResponse, version: VersionTag) -> Result<StateView> {
    let contract_id = response.contract_id().map(str::to_string);
    let state = &response.decoded_result;

    let retips: Vec<DecodedRetip> = state
        .retips
        .iter()
        .map(|(raw_id, raw)| normalize_retip(*raw_id, raw, version))
        .collect();

    let mut tips = Vec::with_capacity(state.tips.len());
    for (raw_id, raw) in &state.tips {
        let decoded = normalize_tip(*raw_id, raw, version);
        tips.push(build_tip(decoded, &retips, state, contract_id.clone())?);
    }

    let urls = build_url_index(state, &tips)?;

    Ok(StateView { urls, tips })
}

fn build_tip(
    decoded: DecodedTip,
    all_retips: &[DecodedRetip],
    state: &RawState,
    contract_id: Option<String>,
) -> Result<Tip> {
    let url = match decoded.url_id {
        Some(url_id) => Some(
            state
                .urls
                .iter()
                .find(|(_, id)| *id == url_id)
                .map(|(url, _)| url.clone())
                .ok_or_else(|| {
                    Error::Consistency(format!(
                        "tip {} references unknown url id {}",
                        decoded.id, url_id
                    ))
                })?,
        ),
        None => None,
    };

    // Only claimable tips own retips; their claims resolve against the
    // parent tip's URL ledger since retips carry no url of their own.
    let retips = match decoded.url_id {
        Some(url_id) => {
            let mut resolved = Vec::new();
            for retip in all_retips
                .iter()
                .filter(|retip| retip.tip_raw_id == decoded.raw_id)
            {
                let claim = resolve_claim(retip.claim_gen, Some(url_id), state)?;
                resolved.push(Retip {
                    id: retip.id.clone(),
                    tip_id: retip.tip_id.clone(),
                    sender: retip.sender.clone(),
                    amount: retip.amount.clone(),
                    token: retip.token.clone(),
                    token_amount: retip.token_amount.clone(),
                    claim_gen: retip.claim_gen,
                    claim,
                });
            }
            Some(resolved)
        }
        None => None,
    };

    let claim = resolve_claim(decoded.claim_gen, decoded.url_id, state)?;

    let mut tip = Tip {
        id: decoded.id,
        kind: decoded.kind,
        contract_id,
        sender: decoded.sender,
        title: decoded.title,
        timestamp: decoded.timestamp,
        media: decoded.media,
        receiver: decoded.receiver,
        url,
        url_id: decoded.url_id,
        amount: decoded.amount,
        token: decoded.token,
        token_amount: decoded.token_amount,
        claim_gen: decoded.claim_gen,
        retips,
        claim,
        total_amount: Amount::zero(),
        total_unclaimed_amount: Amount::zero(),
        total_claimed_amount: Amount::zero(),
        token_total_amount: Vec::new(),
        token_total_unclaimed_amount: Vec::new(),
        token_total_claimed_amount: Vec::new(),
    };

    let totals = compute_totals(&tip);
    tip.total_amount = totals.total_amount;
    tip.total_unclaimed_amount = totals.total_unclaimed_amount;
    tip.total_claimed_amount = totals.total_claimed_amount;
    tip.token_total_amount = totals.token_total_amount;
    tip.token_total_unclaimed_amount = totals.token_total_unclaimed_amount;
    tip.token_total_claimed_amount = totals.token_total_claimed_amount;

    Ok(tip)
}
