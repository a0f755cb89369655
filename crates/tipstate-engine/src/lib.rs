// Engine module - the normalization pipeline over raw contract state
// Sits between the wire schemas (tipstate-decoder) and callers consuming
// typed views

mod claims;
mod totals;
mod urls;

pub mod aggregate;
pub mod merge;

pub use aggregate::aggregate_state;
pub use merge::merge_states;

use tipstate_types::{Amount, StateView, TokenAmount};

/// Authoritative unclaimed balances for one URL in a normalized view,
/// native and per token.
pub fn unclaimed_for_url<'a>(
    view: &'a StateView,
    url: &str,
) -> Option<(&'a Amount, &'a [TokenAmount])> {
    view.urls
        .iter()
        .find(|summary| summary.url == url)
        .map(|summary| {
            (
                &summary.unclaimed_amount,
                summary.token_unclaimed_amount.as_slice(),
            )
        })
}
