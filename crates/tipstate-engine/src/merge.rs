use tipstate_decoder::StateResponse;
use tipstate_types::{Error, Result, StateView, UrlSummary, VersionMapping};

use crate::aggregate::aggregate_state;
use crate::totals::add_to_token_list;

/// Merge snapshots from multiple deployed contract versions into one view.
///
/// Every snapshot is decoded with the version tag its contract address
/// maps to, which version-qualifies all ids before concatenation, so tips
/// never collide across instances. URLs merge by exact string match:
/// id lists concatenate and unclaimed balances add up, natively and per
/// token. Snapshot order does not affect the merged totals.
pub fn merge_states(responses: &[StateResponse], mapping: &VersionMapping) -> Result<StateView> {
    if responses.is_empty() {
        return Err(Error::InputShape(
            "at least one state snapshot is required".to_string(),
        ));
    }

    let mut tips = Vec::new();
    let mut urls: Vec<UrlSummary> = Vec::new();

    for response in responses {
        let contract_id = response.contract_id().ok_or_else(|| {
            Error::InputShape(
                "snapshot is missing result.contractId, required for merging".to_string(),
            )
        })?;
        let version = mapping.get(contract_id).ok_or_else(|| {
            Error::InputShape(format!("no version mapping for contract {}", contract_id))
        })?;

        let view = aggregate_state(response, version)?;
        tips.extend(view.tips);

        for incoming in view.urls {
            match urls.iter_mut().find(|url| url.url == incoming.url) {
                Some(existing) => {
                    existing.tip_ids.extend(incoming.tip_ids);
                    existing.retip_ids.extend(incoming.retip_ids);
                    existing.unclaimed_amount += &incoming.unclaimed_amount;
                    for entry in &incoming.token_unclaimed_amount {
                        add_to_token_list(
                            &mut existing.token_unclaimed_amount,
                            &entry.token,
                            &entry.amount,
                        );
                    }
                }
                None => urls.push(incoming),
            }
        }
    }

    Ok(StateView { urls, tips })
}
