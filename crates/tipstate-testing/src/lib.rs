//! Fixtures for raw snapshot generation.
//!
//! Provides builders that assemble the wrapper + tuple-encoded state shape
//! the chain-query collaborator returns, so tests exercise the same decode
//! path as production callers.

pub mod fixtures;

pub use fixtures::{
    StateBuilder, ae_tip, direct_ae_tip, direct_token_tip, legacy_tip, post_without_tip,
    retip_record, token_retip_record, token_tip,
};
