//! Curve, track and tally types.
//!
//! A [`Curve`] is decoded from chain metadata, where it appears as an
//! externally tagged object with exactly one variant key:
//!
//! ```json
//! { "linearDecreasing": { "length": 100, "floor": 500000000, "ceil": 1000000000 } }
//! ```
//!
//! Unsigned fields are parts-per-billion, reciprocal fields are signed
//! fixed-point values with the same accuracy. Numbers may be given as JSON
//! integers or as decimal strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::PERBILL;
use crate::error::{CurveError, TrackError};

/// A decreasing threshold curve over the decision period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Curve {
    /// Linear decay from `ceil` to `floor` over `length`.
    #[serde(rename_all = "camelCase")]
    LinearDecreasing {
        #[serde(deserialize_with = "lenient::unsigned")]
        length: u128,
        #[serde(deserialize_with = "lenient::unsigned")]
        floor: u128,
        #[serde(deserialize_with = "lenient::unsigned")]
        ceil: u128,
    },
    /// Staircase decay from `begin` to `end`, dropping `step` every `period`.
    #[serde(rename_all = "camelCase")]
    SteppedDecreasing {
        #[serde(deserialize_with = "lenient::unsigned")]
        begin: u128,
        #[serde(deserialize_with = "lenient::unsigned")]
        end: u128,
        #[serde(deserialize_with = "lenient::unsigned")]
        step: u128,
        #[serde(deserialize_with = "lenient::unsigned")]
        period: u128,
    },
    /// `factor / (x + x_offset) + y_offset`.
    #[serde(rename_all = "camelCase")]
    Reciprocal {
        #[serde(deserialize_with = "lenient::signed")]
        factor: i128,
        #[serde(deserialize_with = "lenient::signed")]
        x_offset: i128,
        #[serde(deserialize_with = "lenient::signed")]
        y_offset: i128,
    },
}

/// Variant tag of a [`Curve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveKind {
    LinearDecreasing,
    SteppedDecreasing,
    Reciprocal,
}

impl CurveKind {
    /// The camelCase tag used in chain metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LinearDecreasing => "linearDecreasing",
            Self::SteppedDecreasing => "steppedDecreasing",
            Self::Reciprocal => "reciprocal",
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurveKind {
    type Err = CurveError;

    /// Accepts both the camelCase metadata tag and the PascalCase type name.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "linearDecreasing" | "LinearDecreasing" => Ok(Self::LinearDecreasing),
            "steppedDecreasing" | "SteppedDecreasing" => Ok(Self::SteppedDecreasing),
            "reciprocal" | "Reciprocal" => Ok(Self::Reciprocal),
            other => Err(CurveError::UnknownCurveKind(other.to_string())),
        }
    }
}

impl Curve {
    pub const fn linear_decreasing(length: u128, floor: u128, ceil: u128) -> Self {
        Self::LinearDecreasing {
            length,
            floor,
            ceil,
        }
    }

    pub const fn stepped_decreasing(begin: u128, end: u128, step: u128, period: u128) -> Self {
        Self::SteppedDecreasing {
            begin,
            end,
            step,
            period,
        }
    }

    pub const fn reciprocal(factor: i128, x_offset: i128, y_offset: i128) -> Self {
        Self::Reciprocal {
            factor,
            x_offset,
            y_offset,
        }
    }

    pub fn kind(&self) -> CurveKind {
        match self {
            Self::LinearDecreasing { .. } => CurveKind::LinearDecreasing,
            Self::SteppedDecreasing { .. } => CurveKind::SteppedDecreasing,
            Self::Reciprocal { .. } => CurveKind::Reciprocal,
        }
    }

    /// Decode a curve from its metadata representation.
    ///
    /// An empty object or a tag naming no known variant fails with
    /// [`CurveError::UnknownCurveKind`]; malformed parameters fail with
    /// [`CurveError::Metadata`].
    ///
    /// # Examples
    ///
    /// ```
    /// use referenda_core::types::Curve;
    /// let value = serde_json::json!({
    ///     "steppedDecreasing": { "begin": 1_000_000_000, "end": 0, "step": "100000000", "period": 10 }
    /// });
    /// let curve = Curve::from_metadata(&value).unwrap();
    /// assert_eq!(curve, Curve::stepped_decreasing(1_000_000_000, 0, 100_000_000, 10));
    /// ```
    pub fn from_metadata(value: &Value) -> Result<Self, CurveError> {
        let object = value
            .as_object()
            .ok_or_else(|| CurveError::Metadata(format!("expected an object, got {value}")))?;

        let mut entries = object.iter();
        let (tag, params) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            (None, _) => return Err(CurveError::UnknownCurveKind("<empty>".to_string())),
            (Some(_), Some(_)) => {
                return Err(CurveError::Metadata(format!(
                    "expected exactly one variant, got {}",
                    object.len()
                )));
            }
        };

        let kind: CurveKind = tag.parse()?;
        let mut canonical = Map::with_capacity(1);
        canonical.insert(kind.as_str().to_string(), params.clone());

        serde_json::from_value(Value::Object(canonical))
            .map_err(|e| CurveError::Metadata(format!("{kind}: {e}")))
    }

    /// Check that the parameters lie in the domain where the curve is
    /// non-increasing and bounded by a full proportion.
    ///
    /// Evaluation does not require a valid curve; this reports the first
    /// violated constraint as [`CurveError::InvalidParameters`].
    pub fn validate(&self) -> Result<(), CurveError> {
        let fail = |msg: String| Err(CurveError::InvalidParameters(msg));
        match *self {
            Self::LinearDecreasing {
                length,
                floor,
                ceil,
            } => {
                if ceil > PERBILL {
                    return fail(format!("ceil {ceil} exceeds {PERBILL}"));
                }
                if floor > ceil {
                    return fail(format!("floor {floor} above ceil {ceil}"));
                }
                if length == 0 {
                    return fail("length is zero".to_string());
                }
            }
            Self::SteppedDecreasing {
                begin,
                end,
                step,
                period,
            } => {
                if begin > PERBILL {
                    return fail(format!("begin {begin} exceeds {PERBILL}"));
                }
                if end > begin {
                    return fail(format!("end {end} above begin {begin}"));
                }
                if step == 0 {
                    return fail("step is zero".to_string());
                }
                if period == 0 {
                    return fail("period is zero".to_string());
                }
            }
            Self::Reciprocal { factor, .. } => {
                if factor <= 0 {
                    return fail(format!("factor {factor} is not positive"));
                }
            }
        }
        Ok(())
    }
}

/// The pair of curves a governance track is configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackCurves {
    /// Required approval (ayes over ayes + nays).
    pub min_approval: Curve,
    /// Required support (turnout over total issuance).
    pub min_support: Curve,
}

impl TrackCurves {
    /// Decode both curves from a track metadata object with `minApproval`
    /// and `minSupport` keys.
    pub fn from_metadata(value: &Value) -> Result<Self, TrackError> {
        let curve = |which: &'static str| -> Result<Curve, TrackError> {
            let raw = value.get(which).ok_or(TrackError::MissingCurve(which))?;
            Curve::from_metadata(raw).map_err(|source| TrackError::Curve { which, source })
        };
        Ok(Self {
            min_approval: curve("minApproval")?,
            min_support: curve("minSupport")?,
        })
    }
}

/// Running tally of a referendum, as supplied by the voting pallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tally {
    ConvictionVoting {
        #[serde(deserialize_with = "lenient::unsigned")]
        ayes: u128,
        #[serde(deserialize_with = "lenient::unsigned")]
        nays: u128,
        #[serde(deserialize_with = "lenient::unsigned")]
        support: u128,
    },
    #[serde(rename_all = "camelCase")]
    RankedCollective {
        #[serde(deserialize_with = "lenient::unsigned")]
        bare_ayes: u128,
        #[serde(deserialize_with = "lenient::unsigned")]
        ayes: u128,
        #[serde(deserialize_with = "lenient::unsigned")]
        nays: u128,
    },
}

/// Lenient number decoding: JSON integers or decimal strings, with `,`
/// and `_` digit separators ignored.
mod lenient {
    use std::fmt;

    use serde::de::{self, Deserializer, Visitor};

    fn digits(v: &str) -> String {
        v.trim().chars().filter(|c| *c != ',' && *c != '_').collect()
    }

    struct Unsigned;

    impl Visitor<'_> for Unsigned {
        type Value = u128;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer or decimal string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u128, E> {
            Ok(v as u128)
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<u128, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u128, E> {
            u128::try_from(v).map_err(|_| E::custom(format!("negative value {v}")))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u128, E> {
            digits(v)
                .parse()
                .map_err(|_| E::custom(format!("invalid unsigned integer {v:?}")))
        }
    }

    struct Signed;

    impl Visitor<'_> for Signed {
        type Value = i128;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer or decimal string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i128, E> {
            Ok(v as i128)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i128, E> {
            Ok(v as i128)
        }

        fn visit_i128<E: de::Error>(self, v: i128) -> Result<i128, E> {
            Ok(v)
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<i128, E> {
            i128::try_from(v).map_err(|_| E::custom(format!("value {v} out of range")))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i128, E> {
            digits(v)
                .parse()
                .map_err(|_| E::custom(format!("invalid integer {v:?}")))
        }
    }

    pub fn unsigned<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        deserializer.deserialize_any(Unsigned)
    }

    pub fn signed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i128, D::Error> {
        deserializer.deserialize_any(Signed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_linear() {
        let value = json!({ "linearDecreasing": { "length": 100, "floor": 500_000_000, "ceil": 1_000_000_000 } });
        assert_eq!(
            Curve::from_metadata(&value).unwrap(),
            Curve::linear_decreasing(100, 500_000_000, 1_000_000_000)
        );
    }

    #[test]
    fn decode_pascal_case_tag() {
        let value = json!({ "LinearDecreasing": { "length": 1, "floor": 0, "ceil": 1 } });
        assert_eq!(
            Curve::from_metadata(&value).unwrap().kind(),
            CurveKind::LinearDecreasing
        );
    }

    #[test]
    fn decode_reciprocal_with_strings() {
        let value = json!({ "reciprocal": { "factor": "222,222,224", "xOffset": "-1_000", "yOffset": -22_222_224 } });
        assert_eq!(
            Curve::from_metadata(&value).unwrap(),
            Curve::reciprocal(222_222_224, -1_000, -22_222_224)
        );
    }

    #[test]
    fn decode_unknown_kind() {
        let value = json!({ "exponential": { "base": 2 } });
        assert_eq!(
            Curve::from_metadata(&value),
            Err(CurveError::UnknownCurveKind("exponential".to_string()))
        );
    }

    #[test]
    fn decode_empty_object_is_unknown_kind() {
        assert_eq!(
            Curve::from_metadata(&json!({})),
            Err(CurveError::UnknownCurveKind("<empty>".to_string()))
        );
    }

    #[test]
    fn decode_rejects_multiple_variants() {
        let value = json!({
            "linearDecreasing": { "length": 1, "floor": 0, "ceil": 1 },
            "reciprocal": { "factor": 1, "xOffset": 1, "yOffset": 0 }
        });
        assert!(matches!(
            Curve::from_metadata(&value),
            Err(CurveError::Metadata(_))
        ));
    }

    #[test]
    fn decode_rejects_negative_unsigned() {
        let value = json!({ "steppedDecreasing": { "begin": 1, "end": -1, "step": 1, "period": 1 } });
        assert!(matches!(
            Curve::from_metadata(&value),
            Err(CurveError::Metadata(_))
        ));
    }

    #[test]
    fn decode_rejects_missing_field() {
        let value = json!({ "linearDecreasing": { "length": 1, "ceil": 1 } });
        assert!(matches!(
            Curve::from_metadata(&value),
            Err(CurveError::Metadata(_))
        ));
    }

    #[test]
    fn decode_rejects_non_object() {
        assert!(matches!(
            Curve::from_metadata(&json!("reciprocal")),
            Err(CurveError::Metadata(_))
        ));
    }

    #[test]
    fn kind_display_matches_tag() {
        assert_eq!(CurveKind::SteppedDecreasing.to_string(), "steppedDecreasing");
        assert_eq!("reciprocal".parse::<CurveKind>().unwrap(), CurveKind::Reciprocal);
    }

    #[test]
    fn serialize_uses_metadata_layout() {
        let curve = Curve::reciprocal(1, 2, 3);
        let value = serde_json::to_value(curve).unwrap();
        assert_eq!(value, json!({ "reciprocal": { "factor": 1, "xOffset": 2, "yOffset": 3 } }));
        assert_eq!(Curve::from_metadata(&value).unwrap(), curve);
    }

    #[test]
    fn validate_accepts_sane_curves() {
        assert!(Curve::linear_decreasing(100, 500_000_000, 1_000_000_000).validate().is_ok());
        assert!(Curve::stepped_decreasing(1_000_000_000, 0, 100_000_000, 10).validate().is_ok());
        assert!(Curve::reciprocal(100_000_000, 100_000_000, 0).validate().is_ok());
    }

    #[test]
    fn validate_reports_first_violation() {
        let err = Curve::linear_decreasing(100, 600, 500).validate().unwrap_err();
        assert_eq!(err, CurveError::InvalidParameters("floor 600 above ceil 500".to_string()));
        assert!(Curve::linear_decreasing(0, 0, 1).validate().is_err());
        assert!(Curve::linear_decreasing(1, 0, PERBILL + 1).validate().is_err());
        assert!(Curve::stepped_decreasing(10, 20, 1, 1).validate().is_err());
        assert!(Curve::stepped_decreasing(10, 0, 0, 1).validate().is_err());
        assert!(Curve::stepped_decreasing(10, 0, 1, 0).validate().is_err());
        assert!(Curve::reciprocal(0, 1, 0).validate().is_err());
    }

    #[test]
    fn track_curves_from_metadata() {
        let value = json!({
            "name": "root",
            "minApproval": { "reciprocal": { "factor": 222_222_224, "xOffset": 333_333_335, "yOffset": 333_333_332 } },
            "minSupport": { "linearDecreasing": { "length": 1_000_000_000, "floor": 0, "ceil": 500_000_000 } }
        });
        let track = TrackCurves::from_metadata(&value).unwrap();
        assert_eq!(track.min_approval.kind(), CurveKind::Reciprocal);
        assert_eq!(track.min_support, Curve::linear_decreasing(1_000_000_000, 0, 500_000_000));
    }

    #[test]
    fn track_curves_missing_and_unknown() {
        let missing = json!({ "minApproval": { "reciprocal": { "factor": 1, "xOffset": 1, "yOffset": 0 } } });
        assert_eq!(
            TrackCurves::from_metadata(&missing),
            Err(TrackError::MissingCurve("minSupport"))
        );

        let unknown = json!({ "minApproval": {}, "minSupport": {} });
        assert_eq!(
            TrackCurves::from_metadata(&unknown),
            Err(TrackError::Curve {
                which: "minApproval",
                source: CurveError::UnknownCurveKind("<empty>".to_string()),
            })
        );
    }

    #[test]
    fn tally_round_trips_camel_case() {
        let value = json!({ "rankedCollective": { "bareAyes": 3, "ayes": 5, "nays": 1 } });
        let tally: Tally = serde_json::from_value(value).unwrap();
        assert_eq!(tally, Tally::RankedCollective { bare_ayes: 3, ayes: 5, nays: 1 });
    }
}
