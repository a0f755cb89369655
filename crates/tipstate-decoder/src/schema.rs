use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use tipstate_types::{Amount, Result, TokenAmount};

/// One contract call response as delivered by the chain-query collaborator:
/// the decoded state plus wrapper metadata identifying the source contract.
///
/// `result` may be absent when a caller hands over bare decoded state; such
/// a snapshot can be aggregated on its own but cannot participate in
/// multi-version merging.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StateResponse {
    #[serde(default)]
    pub result: Option<CallResult>,
    #[serde(rename = "decodedResult")]
    pub decoded_result: RawState,
}

impl StateResponse {
    /// Decode a response from its JSON form.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Source contract address, if the wrapper carried one.
    pub fn contract_id(&self) -> Option<&str> {
        self.result.as_ref().map(|r| r.contract_id.as_str())
    }
}

/// Wrapper metadata of a contract call.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallResult {
    #[serde(rename = "contractId")]
    pub contract_id: String,
}

/// Raw tuple-encoded contract state: four parallel collections keyed by
/// numeric ids, exactly as stored on chain. Immutable input; decoding never
/// writes back into it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawState {
    /// `[url, url_id]` pairs, url_id unique within the snapshot.
    #[serde(default)]
    pub urls: Vec<(String, u64)>,
    /// `[tip_id, payload]` pairs.
    #[serde(default)]
    pub tips: Vec<(u64, RawTip)>,
    /// `[retip_id, payload]` pairs.
    #[serde(default)]
    pub retips: Vec<(u64, RawRetip)>,
    /// `[url_id, ledger_entry]` pairs, one entry per URL.
    #[serde(default)]
    pub claims: Vec<(u64, RawClaim)>,
}

/// One raw tip payload.
///
/// Later schemas tag the variant; the earliest schema stores a flat record.
/// Unrecognized variant tags also land in the flat shape (every field
/// defaulted) so legacy or future state degrades softly instead of failing
/// the whole snapshot.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawTip {
    Tagged(TaggedTip),
    Legacy(LegacyTip),
}

/// Tagged tip variants, encoded as a single-key object over the positional
/// payload: `{"AeTip": [meta, url_id, amount, claim_gen]}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub enum TaggedTip {
    AeTip(TipMeta, u64, Amount, RawClaimGen),
    TokenTip(TipMeta, u64, (String, Amount), RawClaimGen),
    DirectAeTip(TipMeta, String, Amount),
    DirectTokenTip(TipMeta, String, (String, Amount)),
    PostWithoutTip(TipMeta, Vec<String>),
}

/// Common metadata record carried by every tagged tip variant.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TipMeta {
    pub sender: String,
    pub title: String,
    #[serde(default)]
    pub timestamp: Option<u64>,
}

/// Flat tip record of the earliest schema, doubling as the soft fallback
/// shape for unrecognized variant tags.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LegacyTip {
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub timestamp: Option<u64>,
    #[serde(default)]
    pub url_id: Option<u64>,
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(default)]
    pub claim_gen: RawClaimGen,
}

/// Raw retip record referencing its parent tip. Token fields only exist
/// from the second schema on and default away cleanly.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawRetip {
    pub tip_id: u64,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub token_amount: Option<Amount>,
    #[serde(default)]
    pub claim_gen: RawClaimGen,
}

/// Claim generation as recorded on a tip or retip.
///
/// Accepts every encoding the contract family ever produced: a bare
/// integer, JSON null, the sentinels `"None"` / `["None"]`, the tagged
/// tuple `["Some", n]`, and the object form `{"Some": n}`. Normalized here,
/// exactly once, into a plain optional integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawClaimGen(pub Option<u64>);

impl<'de> Deserialize<'de> for RawClaimGen {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ClaimGenVisitor;

        impl<'de> Visitor<'de> for ClaimGenVisitor {
            type Value = RawClaimGen;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a claim generation (integer, null, or tagged option)")
            }

            fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawClaimGen(Some(v)))
            }

            fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(v)
                    .map(|n| RawClaimGen(Some(n)))
                    .map_err(|_| E::custom(format!("negative claim generation: {}", v)))
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawClaimGen(None))
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                match v {
                    "None" => Ok(RawClaimGen(None)),
                    other => Err(E::custom(format!("unexpected claim generation: {:?}", other))),
                }
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let tag: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let value = match tag.as_str() {
                    "Some" => {
                        let n: u64 = seq
                            .next_element()?
                            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                        RawClaimGen(Some(n))
                    }
                    "None" => RawClaimGen(None),
                    other => {
                        return Err(de::Error::custom(format!(
                            "unexpected option tag: {:?}",
                            other
                        )));
                    }
                };
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(value)
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut value = RawClaimGen(None);
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "Some" => value = RawClaimGen(Some(map.next_value()?)),
                        "None" => {
                            let _ = map.next_value::<IgnoredAny>()?;
                        }
                        other => {
                            return Err(de::Error::custom(format!(
                                "unexpected option tag: {:?}",
                                other
                            )));
                        }
                    }
                }
                Ok(value)
            }
        }

        deserializer.deserialize_any(ClaimGenVisitor)
    }
}

impl Serialize for RawClaimGen {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Some(n) => serializer.serialize_u64(n),
            None => serializer.serialize_none(),
        }
    }
}

/// One claims-ledger entry: `[claim_gen, unclaimed_ae, token_list]`. The
/// earliest schema omits the token list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawClaim {
    pub claim_gen: u64,
    pub unclaimed_amount: Amount,
    pub token_unclaimed_amount: Vec<TokenAmount>,
}

impl<'de> Deserialize<'de> for RawClaim {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ClaimVisitor;

        impl<'de> Visitor<'de> for ClaimVisitor {
            type Value = RawClaim;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a claims ledger entry [claim_gen, amount, token_list]")
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let claim_gen: u64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let unclaimed_amount: Amount = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let pairs: Vec<(String, Amount)> =
                    seq.next_element()?.unwrap_or_default();
                while seq.next_element::<IgnoredAny>()?.is_some() {}

                Ok(RawClaim {
                    claim_gen,
                    unclaimed_amount,
                    token_unclaimed_amount: pairs
                        .into_iter()
                        .map(|(token, amount)| TokenAmount { token, amount })
                        .collect(),
                })
            }
        }

        deserializer.deserialize_seq(ClaimVisitor)
    }
}

impl Serialize for RawClaim {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(3))?;
        seq.serialize_element(&self.claim_gen)?;
        seq.serialize_element(&self.unclaimed_amount)?;
        let pairs: Vec<(&str, &Amount)> = self
            .token_unclaimed_amount
            .iter()
            .map(|entry| (entry.token.as_str(), &entry.amount))
            .collect();
        seq.serialize_element(&pairs)?;
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_gen_accepts_all_encodings() {
        let cases: &[(&str, Option<u64>)] = &[
            ("3", Some(3)),
            ("null", None),
            ("\"None\"", None),
            ("[\"None\"]", None),
            ("[\"Some\", 5]", Some(5)),
            ("{\"Some\": 7}", Some(7)),
        ];
        for (json, expected) in cases {
            let parsed: RawClaimGen = serde_json::from_str(json).unwrap();
            assert_eq!(parsed.0, *expected, "decoding {}", json);
        }

        assert!(serde_json::from_str::<RawClaimGen>("\"Maybe\"").is_err());
        assert!(serde_json::from_str::<RawClaimGen>("-1").is_err());
    }

    #[test]
    fn test_claim_accepts_two_and_three_element_forms() {
        let v1: RawClaim = serde_json::from_str("[1, 4]").unwrap();
        assert_eq!(v1.claim_gen, 1);
        assert_eq!(v1.unclaimed_amount, Amount::from(4u64));
        assert!(v1.token_unclaimed_amount.is_empty());

        let v2: RawClaim = serde_json::from_str(r#"[2, 0, [["ct_token", 333]]]"#).unwrap();
        assert_eq!(v2.claim_gen, 2);
        assert_eq!(v2.token_unclaimed_amount.len(), 1);
        assert_eq!(v2.token_unclaimed_amount[0].token, "ct_token");
        assert_eq!(v2.token_unclaimed_amount[0].amount, Amount::from(333u64));
    }

    #[test]
    fn test_tagged_tip_wire_form() {
        let json = r#"{"AeTip": [{"sender": "ak_s", "title": "Hello"}, 0, 100, 1]}"#;
        let tip: RawTip = serde_json::from_str(json).unwrap();
        match tip {
            RawTip::Tagged(TaggedTip::AeTip(meta, url_id, amount, claim_gen)) => {
                assert_eq!(meta.sender, "ak_s");
                assert_eq!(meta.title, "Hello");
                assert_eq!(url_id, 0);
                assert_eq!(amount, Amount::from(100u64));
                assert_eq!(claim_gen.0, Some(1));
            }
            other => panic!("expected AeTip, got {:?}", other),
        }
    }

    #[test]
    fn test_token_tip_wire_form() {
        let json =
            r#"{"TokenTip": [{"sender": "ak_s", "title": "T"}, 2, ["ct_token", "333"], 1]}"#;
        let tip: RawTip = serde_json::from_str(json).unwrap();
        match tip {
            RawTip::Tagged(TaggedTip::TokenTip(_, url_id, (token, amount), _)) => {
                assert_eq!(url_id, 2);
                assert_eq!(token, "ct_token");
                assert_eq!(amount, Amount::from(333u64));
            }
            other => panic!("expected TokenTip, got {:?}", other),
        }
    }

    #[test]
    fn test_legacy_flat_record() {
        let json = r#"{"sender": "ak_s", "title": "Old", "url_id": 1, "amount": 8, "claim_gen": 1}"#;
        let tip: RawTip = serde_json::from_str(json).unwrap();
        match tip {
            RawTip::Legacy(legacy) => {
                assert_eq!(legacy.url_id, Some(1));
                assert_eq!(legacy.amount, Some(Amount::from(8u64)));
                assert_eq!(legacy.claim_gen.0, Some(1));
            }
            other => panic!("expected legacy record, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tag_degrades_to_legacy() {
        let json = r#"{"BurnTip": [{"sender": "ak_s", "title": "X"}, 0, 100]}"#;
        let tip: RawTip = serde_json::from_str(json).unwrap();
        match tip {
            RawTip::Legacy(legacy) => {
                assert_eq!(legacy.url_id, None);
                assert_eq!(legacy.amount, None);
            }
            other => panic!("expected fallback to legacy, got {:?}", other),
        }
    }

    #[test]
    fn test_state_response_wrapper() {
        let json = r#"{
            "result": {"contractId": "ct_abc"},
            "decodedResult": {
                "urls": [["domain.test", 0]],
                "tips": [],
                "retips": [],
                "claims": [[0, [0, 0, []]]]
            }
        }"#;
        let response: StateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.contract_id(), Some("ct_abc"));
        assert_eq!(response.decoded_result.urls.len(), 1);

        let bare = r#"{"decodedResult": {"urls": [], "tips": [], "retips": [], "claims": []}}"#;
        let response: StateResponse = serde_json::from_str(bare).unwrap();
        assert_eq!(response.contract_id(), None);
    }
}
