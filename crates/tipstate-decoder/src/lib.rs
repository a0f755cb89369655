// Raw wire schema (serde models of tuple-encoded contract state)
pub mod schema;

// Tip variant decoding into canonical flat records
pub mod normalize;

pub use normalize::{DecodedRetip, DecodedTip, normalize_retip, normalize_tip, qualify_id};
pub use schema::{
    CallResult, LegacyTip, RawClaim, RawClaimGen, RawRetip, RawState, RawTip, StateResponse,
    TaggedTip, TipMeta,
};
