use tipstate_types::{Amount, Retip, Tip, TokenAmount};

/// Aggregate amounts derived from a tip and its resolved retips.
pub(crate) struct TipTotals {
    pub total_amount: Amount,
    pub total_unclaimed_amount: Amount,
    pub total_claimed_amount: Amount,
    pub token_total_amount: Vec<TokenAmount>,
    pub token_total_unclaimed_amount: Vec<TokenAmount>,
    pub token_total_claimed_amount: Vec<TokenAmount>,
}

/// Union-sum `amount` into the entry for `token`, appending a new entry
/// for a first-seen token. Entry order is first-seen order.
pub(crate) fn add_to_token_list(list: &mut Vec<TokenAmount>, token: &str, amount: &Amount) {
    match list.iter_mut().find(|entry| entry.token == token) {
        Some(entry) => entry.amount += amount,
        None => list.push(TokenAmount {
            token: token.to_string(),
            amount: amount.clone(),
        }),
    }
}

/// Derive totals for a tip whose `claim` and `retips` are already
/// resolved.
///
/// Native and token channels are partitioned independently: a tip and
/// each of its retips contribute to exactly one channel each, but a tip's
/// token and a retip's token need not agree. The unclaimed/claimed split
/// only applies to claimable tips; for direct tips and posts both sides
/// stay zero.
pub(crate) fn compute_totals(tip: &Tip) -> TipTotals {
    let retips: &[Retip] = tip.retips.as_deref().unwrap_or(&[]);
    let claimable = tip.claim.is_some();

    let mut total_amount = tip.amount.clone();
    for retip in retips {
        total_amount += &retip.amount;
    }

    let mut total_unclaimed_amount = Amount::zero();
    let mut total_claimed_amount = Amount::zero();
    let mut token_total_amount = Vec::new();
    let mut token_total_unclaimed_amount = Vec::new();
    let mut token_total_claimed_amount = Vec::new();

    if let Some(token) = tip.token.as_deref() {
        add_to_token_list(&mut token_total_amount, token, &tip.token_amount);
    }
    for retip in retips {
        if let Some(token) = retip.token.as_deref() {
            add_to_token_list(&mut token_total_amount, token, &retip.token_amount);
        }
    }

    if claimable {
        let tip_unclaimed = tip.claim.as_ref().is_some_and(|claim| claim.unclaimed);
        if tip_unclaimed {
            total_unclaimed_amount += &tip.amount;
        } else {
            total_claimed_amount += &tip.amount;
        }
        if let Some(token) = tip.token.as_deref() {
            let split = if tip_unclaimed {
                &mut token_total_unclaimed_amount
            } else {
                &mut token_total_claimed_amount
            };
            add_to_token_list(split, token, &tip.token_amount);
        }

        for retip in retips {
            let retip_unclaimed = retip.claim.as_ref().is_some_and(|claim| claim.unclaimed);
            if retip_unclaimed {
                total_unclaimed_amount += &retip.amount;
            } else {
                total_claimed_amount += &retip.amount;
            }
            if let Some(token) = retip.token.as_deref() {
                let split = if retip_unclaimed {
                    &mut token_total_unclaimed_amount
                } else {
                    &mut token_total_claimed_amount
                };
                add_to_token_list(split, token, &retip.token_amount);
            }
        }
    }

    TipTotals {
        total_amount,
        total_unclaimed_amount,
        total_claimed_amount,
        token_total_amount,
        token_total_unclaimed_amount,
        token_total_claimed_amount,
    }
}
