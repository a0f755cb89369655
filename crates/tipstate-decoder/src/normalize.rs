use tipstate_types::{Amount, TipKind, VersionTag};

use crate::schema::{LegacyTip, RawRetip, RawTip, TaggedTip, TipMeta};

/// Version-qualified identifier: the raw numeric id suffixed with the
/// schema tag. Raw ids are only unique within one deployed instance, so
/// qualification must happen at decode time, before any merging.
pub fn qualify_id(raw_id: u64, version: VersionTag) -> String {
    format!("{}_{}", raw_id, version)
}

/// Flat canonical tip record produced by the variant decoder.
///
/// Fields a schema version does not carry come out defaulted: `token`
/// null, `token_amount` zero, `claim_gen` null. URL resolution, claim
/// status, and totals are attached downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTip {
    pub id: String,
    pub raw_id: u64,
    pub kind: TipKind,
    pub sender: Option<String>,
    pub title: Option<String>,
    pub timestamp: Option<u64>,
    pub media: Option<Vec<String>>,
    pub receiver: Option<String>,
    pub url_id: Option<u64>,
    pub amount: Amount,
    pub token: Option<String>,
    pub token_amount: Amount,
    pub claim_gen: Option<u64>,
}

/// Flat canonical retip record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRetip {
    pub id: String,
    pub raw_id: u64,
    pub tip_raw_id: u64,
    pub tip_id: String,
    pub sender: Option<String>,
    pub amount: Amount,
    pub token: Option<String>,
    pub token_amount: Amount,
    pub claim_gen: Option<u64>,
}

/// Normalize one raw tip into the canonical shape.
///
/// Unknown variant tags have already degraded to the legacy shape at the
/// serde layer and are typed [`TipKind::AeTip`]. Variants without a
/// `url_id` (direct tips, posts) come out with `url_id == None`;
/// downstream stages must not attempt URL lookups for them.
pub fn normalize_tip(raw_id: u64, raw: &RawTip, version: VersionTag) -> DecodedTip {
    let id = qualify_id(raw_id, version);
    match raw {
        RawTip::Tagged(TaggedTip::AeTip(meta, url_id, amount, claim_gen)) => DecodedTip {
            kind: TipKind::AeTip,
            url_id: Some(*url_id),
            amount: amount.clone(),
            claim_gen: claim_gen.0,
            ..base(id, raw_id, meta)
        },
        RawTip::Tagged(TaggedTip::TokenTip(meta, url_id, (token, token_amount), claim_gen)) => {
            DecodedTip {
                kind: TipKind::TokenTip,
                url_id: Some(*url_id),
                token: Some(token.clone()),
                token_amount: token_amount.clone(),
                claim_gen: claim_gen.0,
                ..base(id, raw_id, meta)
            }
        }
        RawTip::Tagged(TaggedTip::DirectAeTip(meta, receiver, amount)) => DecodedTip {
            kind: TipKind::DirectAeTip,
            receiver: Some(receiver.clone()),
            amount: amount.clone(),
            ..base(id, raw_id, meta)
        },
        RawTip::Tagged(TaggedTip::DirectTokenTip(meta, receiver, (token, token_amount))) => {
            DecodedTip {
                kind: TipKind::DirectTokenTip,
                receiver: Some(receiver.clone()),
                token: Some(token.clone()),
                token_amount: token_amount.clone(),
                ..base(id, raw_id, meta)
            }
        }
        RawTip::Tagged(TaggedTip::PostWithoutTip(meta, media)) => DecodedTip {
            kind: TipKind::PostWithoutTip,
            media: Some(media.clone()),
            ..base(id, raw_id, meta)
        },
        RawTip::Legacy(legacy) => from_legacy(id, raw_id, legacy),
    }
}

/// Normalize one raw retip into the canonical shape.
pub fn normalize_retip(raw_id: u64, raw: &RawRetip, version: VersionTag) -> DecodedRetip {
    DecodedRetip {
        id: qualify_id(raw_id, version),
        raw_id,
        tip_raw_id: raw.tip_id,
        tip_id: qualify_id(raw.tip_id, version),
        sender: raw.sender.clone(),
        amount: raw.amount.clone().unwrap_or_default(),
        token: raw.token.clone(),
        token_amount: raw.token_amount.clone().unwrap_or_default(),
        claim_gen: raw.claim_gen.0,
    }
}

fn base(id: String, raw_id: u64, meta: &TipMeta) -> DecodedTip {
    DecodedTip {
        id,
        raw_id,
        kind: TipKind::AeTip,
        sender: Some(meta.sender.clone()),
        title: Some(meta.title.clone()),
        timestamp: meta.timestamp,
        media: None,
        receiver: None,
        url_id: None,
        amount: Amount::zero(),
        token: None,
        token_amount: Amount::zero(),
        claim_gen: None,
    }
}

fn from_legacy(id: String, raw_id: u64, legacy: &LegacyTip) -> DecodedTip {
    DecodedTip {
        id,
        raw_id,
        kind: TipKind::AeTip,
        sender: legacy.sender.clone(),
        title: legacy.title.clone(),
        timestamp: legacy.timestamp,
        media: None,
        receiver: None,
        url_id: legacy.url_id,
        amount: legacy.amount.clone().unwrap_or_default(),
        token: None,
        token_amount: Amount::zero(),
        claim_gen: legacy.claim_gen.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RawClaimGen;

    fn meta(sender: &str, title: &str) -> TipMeta {
        TipMeta {
            sender: sender.to_string(),
            title: title.to_string(),
            timestamp: Some(1_600_000_000),
        }
    }

    #[test]
    fn test_qualify_id() {
        assert_eq!(qualify_id(0, VersionTag::V1), "0_v1");
        assert_eq!(qualify_id(3, VersionTag::V2), "3_v2");
    }

    #[test]
    fn test_normalize_ae_tip() {
        let raw = RawTip::Tagged(TaggedTip::AeTip(
            meta("ak_s", "Hello World"),
            0,
            Amount::from(100u64),
            RawClaimGen(Some(1)),
        ));
        let tip = normalize_tip(0, &raw, VersionTag::V2);

        assert_eq!(tip.id, "0_v2");
        assert_eq!(tip.kind, TipKind::AeTip);
        assert_eq!(tip.url_id, Some(0));
        assert_eq!(tip.amount, Amount::from(100u64));
        assert_eq!(tip.token, None);
        assert!(tip.token_amount.is_zero());
        assert_eq!(tip.claim_gen, Some(1));
        assert_eq!(tip.title.as_deref(), Some("Hello World"));
    }

    #[test]
    fn test_normalize_token_tip_has_zero_native_amount() {
        let raw = RawTip::Tagged(TaggedTip::TokenTip(
            meta("ak_s", "T"),
            2,
            ("ct_token".to_string(), Amount::from(333u64)),
            RawClaimGen(Some(1)),
        ));
        let tip = normalize_tip(5, &raw, VersionTag::V2);

        assert_eq!(tip.kind, TipKind::TokenTip);
        assert!(tip.amount.is_zero());
        assert_eq!(tip.token.as_deref(), Some("ct_token"));
        assert_eq!(tip.token_amount, Amount::from(333u64));
    }

    #[test]
    fn test_normalize_direct_tip_has_no_url() {
        let raw = RawTip::Tagged(TaggedTip::DirectAeTip(
            meta("ak_s", "Direct"),
            "ak_receiver".to_string(),
            Amount::from(10000u64),
        ));
        let tip = normalize_tip(1, &raw, VersionTag::V2);

        assert_eq!(tip.kind, TipKind::DirectAeTip);
        assert_eq!(tip.url_id, None);
        assert_eq!(tip.receiver.as_deref(), Some("ak_receiver"));
        assert_eq!(tip.claim_gen, None);
    }

    #[test]
    fn test_normalize_post_keeps_media() {
        let raw = RawTip::Tagged(TaggedTip::PostWithoutTip(
            meta("ak_s", "Hello World"),
            vec!["media1".to_string(), "media2".to_string()],
        ));
        let tip = normalize_tip(0, &raw, VersionTag::V3);

        assert_eq!(tip.id, "0_v3");
        assert_eq!(tip.kind, TipKind::PostWithoutTip);
        assert_eq!(tip.url_id, None);
        assert_eq!(
            tip.media,
            Some(vec!["media1".to_string(), "media2".to_string()])
        );
        assert!(tip.amount.is_zero());
    }

    #[test]
    fn test_normalize_legacy_record_is_ae_tip() {
        let raw = RawTip::Legacy(LegacyTip {
            sender: Some("ak_s".to_string()),
            title: Some("Old".to_string()),
            timestamp: None,
            url_id: Some(1),
            amount: Some(Amount::from(8u64)),
            claim_gen: RawClaimGen(Some(1)),
        });
        let tip = normalize_tip(2, &raw, VersionTag::V1);

        assert_eq!(tip.id, "2_v1");
        assert_eq!(tip.kind, TipKind::AeTip);
        assert_eq!(tip.url_id, Some(1));
        assert_eq!(tip.amount, Amount::from(8u64));
    }

    #[test]
    fn test_normalize_unknown_shape_defaults() {
        // Whatever an unrecognized tag carried, the fallback record has
        // every field defaulted and no URL to resolve.
        let raw = RawTip::Legacy(LegacyTip::default());
        let tip = normalize_tip(9, &raw, VersionTag::V4);

        assert_eq!(tip.id, "9_v4");
        assert_eq!(tip.kind, TipKind::AeTip);
        assert_eq!(tip.url_id, None);
        assert!(tip.amount.is_zero());
        assert_eq!(tip.claim_gen, None);
    }

    #[test]
    fn test_normalize_retip_defaults_token_fields() {
        let raw = RawRetip {
            tip_id: 3,
            sender: Some("ak_r".to_string()),
            amount: Some(Amount::from(77u64)),
            token: None,
            token_amount: None,
            claim_gen: RawClaimGen(Some(2)),
        };
        let retip = normalize_retip(0, &raw, VersionTag::V2);

        assert_eq!(retip.id, "0_v2");
        assert_eq!(retip.tip_id, "3_v2");
        assert_eq!(retip.tip_raw_id, 3);
        assert_eq!(retip.amount, Amount::from(77u64));
        assert!(retip.token_amount.is_zero());
        assert_eq!(retip.claim_gen, Some(2));
    }
}
