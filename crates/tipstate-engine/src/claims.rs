use tipstate_decoder::RawState;
use tipstate_types::{ClaimInfo, Error, Result};

/// Resolve the claim status of a tip or retip against its URL's claims
/// ledger entry.
///
/// `url_id == None` means the record is not claimable (direct tips,
/// posts); that is a valid state, not an error. A `url_id` without a
/// ledger entry means the snapshot is self-inconsistent.
pub(crate) fn resolve_claim(
    claim_gen: Option<u64>,
    url_id: Option<u64>,
    state: &RawState,
) -> Result<Option<ClaimInfo>> {
    let Some(url_id) = url_id else {
        return Ok(None);
    };

    let ledger = state
        .claims
        .iter()
        .find(|(id, _)| *id == url_id)
        .map(|(_, entry)| entry)
        .ok_or_else(|| Error::Consistency(format!("no claims entry for url id {}", url_id)))?;

    // A record without a recorded generation predates generation tracking
    // and counts as settled.
    let unclaimed = claim_gen.is_some_and(|generation| generation > ledger.claim_gen);

    Ok(Some(ClaimInfo {
        unclaimed,
        claim_gen: ledger.claim_gen,
        unclaimed_amount: ledger.unclaimed_amount.clone(),
        token_unclaimed_amount: ledger.token_unclaimed_amount.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tipstate_decoder::RawClaim;
    use tipstate_types::Amount;

    fn state_with_claim(url_id: u64, claim_gen: u64, unclaimed: u64) -> RawState {
        RawState {
            claims: vec![(
                url_id,
                RawClaim {
                    claim_gen,
                    unclaimed_amount: Amount::from(unclaimed),
                    token_unclaimed_amount: Vec::new(),
                },
            )],
            ..RawState::default()
        }
    }

    #[test]
    fn test_no_url_is_not_claimable() {
        let state = state_with_claim(0, 0, 0);
        assert_eq!(resolve_claim(Some(1), None, &state).unwrap(), None);
    }

    #[test]
    fn test_unclaimed_when_generation_ahead_of_ledger() {
        let state = state_with_claim(0, 0, 177);
        let claim = resolve_claim(Some(1), Some(0), &state).unwrap().unwrap();
        assert!(claim.unclaimed);
        assert_eq!(claim.claim_gen, 0);
        assert_eq!(claim.unclaimed_amount, Amount::from(177u64));
    }

    #[test]
    fn test_claimed_when_ledger_caught_up() {
        let state = state_with_claim(0, 1, 0);
        let claim = resolve_claim(Some(1), Some(0), &state).unwrap().unwrap();
        assert!(!claim.unclaimed);
    }

    #[test]
    fn test_null_generation_counts_as_settled() {
        let state = state_with_claim(0, 0, 0);
        let claim = resolve_claim(None, Some(0), &state).unwrap().unwrap();
        assert!(!claim.unclaimed);
    }

    #[test]
    fn test_missing_ledger_entry_is_consistency_error() {
        let state = state_with_claim(0, 0, 0);
        let err = resolve_claim(Some(1), Some(7), &state).unwrap_err();
        assert!(matches!(err, Error::Consistency(_)));
    }
}
