//! Zero-or-one-element sequence encoding for optional values.
//!
//! The remote endpoint represents every optional argument and every optional
//! payload field as a sequence holding either nothing or exactly one element.
//! Code outside this module deals only in `Option<T>`: request builders call
//! [`encode`], and payload structs route their optional fields through the
//! [`seq`] serde adapter, which is built on the same two functions.

use crate::error::ErrorKind;

/// Encode an optional value as a zero-or-one-element sequence.
///
/// ```
/// use messagr_types::codec::encode;
///
/// assert_eq!(encode(Some(7u32)), vec![7]);
/// assert!(encode::<u32>(None).is_empty());
/// ```
pub fn encode<T>(value: Option<T>) -> Vec<T> {
    value.into_iter().collect()
}

/// Decode a zero-or-one-element sequence back into an optional value.
///
/// Any sequence longer than one element violates the convention and is
/// rejected with [`ErrorKind::InvalidInput`].
pub fn decode<T>(sequence: Vec<T>) -> Result<Option<T>, ErrorKind> {
    match sequence.len() {
        0 => Ok(None),
        1 => Ok(sequence.into_iter().next()),
        n => Err(ErrorKind::InvalidInput(format!(
            "optional value encoded as a sequence of {n} elements"
        ))),
    }
}

/// Serde adapter for `Option<T>` fields exchanged with the endpoint.
///
/// Use as `#[serde(with = "crate::codec::seq", default)]`.
pub mod seq {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        super::encode(value.as_ref()).serialize(serializer)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let sequence = Vec::<T>::deserialize(deserializer)?;
        super::decode(sequence).map_err(D::Error::custom)
    }
}
