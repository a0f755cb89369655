use tipstate_decoder::RawState;
use tipstate_types::{Error, Result, Tip, UrlSummary};

/// Build the per-URL index for one snapshot.
///
/// The claims ledger is the authoritative source for unclaimed totals;
/// they are copied verbatim, never recomputed from tips. Tip and retip id
/// order follows the snapshot's tip order.
pub(crate) fn build_url_index(state: &RawState, tips: &[Tip]) -> Result<Vec<UrlSummary>> {
    state
        .urls
        .iter()
        .map(|(url, url_id)| {
            let ledger = state
                .claims
                .iter()
                .find(|(id, _)| id == url_id)
                .map(|(_, entry)| entry)
                .ok_or_else(|| {
                    Error::Consistency(format!(
                        "no claims entry for url id {} ({})",
                        url_id, url
                    ))
                })?;

            let mut tip_ids = Vec::new();
            let mut retip_ids = Vec::new();
            for tip in tips.iter().filter(|tip| tip.url_id == Some(*url_id)) {
                tip_ids.push(tip.id.clone());
                if let Some(retips) = &tip.retips {
                    retip_ids.extend(retips.iter().map(|retip| retip.id.clone()));
                }
            }

            Ok(UrlSummary {
                url: url.clone(),
                tip_ids,
                retip_ids,
                unclaimed_amount: ledger.unclaimed_amount.clone(),
                token_unclaimed_amount: ledger.token_unclaimed_amount.clone(),
            })
        })
        .collect()
}
