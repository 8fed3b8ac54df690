//! Test matrices handed to the drivers on the command line.
//!
//! Both matrices are JSON objects keyed by subtype. Key order is the order
//! messages travel in: it is captured once, at construction, as the
//! [`SubTypeList`] and never recomputed.

use indexmap::IndexMap;
use jms_interop_codec::{JmsMessageType, Subtype};
use serde_json::Value;

use crate::HarnessError;

/// Subtype names in the insertion order of the input object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubTypeList(Vec<String>);

impl SubTypeList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Receiver input: expected message count per subtype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestNumberMap {
    counts: IndexMap<String, usize>,
    sub_types: SubTypeList,
    expected_total: usize,
}

impl TestNumberMap {
    pub fn from_json(message_type: JmsMessageType, text: &str) -> Result<Self, HarnessError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(message_type, &value)
    }

    pub fn from_value(message_type: JmsMessageType, value: &Value) -> Result<Self, HarnessError> {
        let object = as_object(value, "test number map")?;
        let mut counts = IndexMap::with_capacity(object.len());
        for (subtype, count) in object {
            check_subtype(message_type, subtype)?;
            let count = count
                .as_u64()
                .and_then(|count| usize::try_from(count).ok())
                .ok_or_else(|| {
                    HarnessError::Argument(format!(
                        "count for subtype \"{subtype}\" must be a non-negative integer, \
                         found {count}"
                    ))
                })?;
            counts.insert(subtype.clone(), count);
        }
        Ok(Self::from_counts(counts))
    }

    fn from_counts(counts: IndexMap<String, usize>) -> Self {
        let sub_types = SubTypeList(counts.keys().cloned().collect());
        let expected_total = counts.values().sum();
        Self {
            counts,
            sub_types,
            expected_total,
        }
    }

    /// Expected count for `subtype`; zero for names not in the map.
    pub fn count(&self, subtype: &str) -> usize {
        self.counts.get(subtype).copied().unwrap_or(0)
    }

    pub fn sub_types(&self) -> &SubTypeList {
        &self.sub_types
    }

    pub fn expected_total(&self) -> usize {
        self.expected_total
    }
}

/// Sender input: the ordered test values of every subtype.
#[derive(Debug, Clone, PartialEq)]
pub struct TestValueMap {
    values: IndexMap<String, Vec<Value>>,
    sub_types: SubTypeList,
}

impl TestValueMap {
    pub fn from_json(message_type: JmsMessageType, text: &str) -> Result<Self, HarnessError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(message_type, &value)
    }

    pub fn from_value(message_type: JmsMessageType, value: &Value) -> Result<Self, HarnessError> {
        let object = as_object(value, "test value map")?;
        let mut values = IndexMap::with_capacity(object.len());
        for (subtype, list) in object {
            check_subtype(message_type, subtype)?;
            let list = list.as_array().ok_or_else(|| {
                HarnessError::Argument(format!(
                    "values for subtype \"{subtype}\" must be a JSON array, found {list}"
                ))
            })?;
            values.insert(subtype.clone(), list.clone());
        }
        let sub_types = SubTypeList(values.keys().cloned().collect());
        Ok(Self { values, sub_types })
    }

    pub fn sub_types(&self) -> &SubTypeList {
        &self.sub_types
    }

    pub fn values(&self, subtype: &str) -> &[Value] {
        self.values.get(subtype).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total(&self) -> usize {
        self.values.values().map(Vec::len).sum()
    }

    /// The matching receiver input: one expected message per test value.
    pub fn number_map(&self) -> TestNumberMap {
        TestNumberMap::from_counts(
            self.values
                .iter()
                .map(|(subtype, list)| (subtype.clone(), list.len()))
                .collect(),
        )
    }

    /// Every test value with its subtype and index, in send order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize, &Value)> {
        self.values.iter().flat_map(|(subtype, list)| {
            list.iter()
                .enumerate()
                .map(move |(index, value)| (subtype.as_str(), index, value))
        })
    }
}

fn as_object<'a>(
    value: &'a Value,
    what: &str,
) -> Result<&'a serde_json::Map<String, Value>, HarnessError> {
    value
        .as_object()
        .ok_or_else(|| {
            HarnessError::Argument(format!("{what} must be a JSON object, found {value}"))
        })
}

fn check_subtype(message_type: JmsMessageType, subtype: &str) -> Result<(), HarnessError> {
    if message_type.has_subtypes() {
        Subtype::parse(subtype)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jms_interop_codec::CodecError;
    use serde_json::json;

    #[test]
    fn number_map_keeps_insertion_order() {
        let map = TestNumberMap::from_json(
            JmsMessageType::Map,
            r#"{"string": 1, "boolean": 2, "int": 0}"#,
        )
        .unwrap();
        let order: Vec<_> = map.sub_types().iter().collect();
        assert_eq!(order, ["string", "boolean", "int"]);
        assert_eq!(map.expected_total(), 3);
        assert_eq!(map.count("boolean"), 2);
        assert_eq!(map.count("long"), 0);
    }

    #[test]
    fn number_map_rejects_unknown_subtypes_and_bad_counts() {
        assert!(matches!(
            TestNumberMap::from_json(JmsMessageType::Bytes, r#"{"decimal": 1}"#),
            Err(HarnessError::Codec(CodecError::UnknownSubtype(_)))
        ));
        assert!(matches!(
            TestNumberMap::from_json(JmsMessageType::Bytes, r#"{"int": -1}"#),
            Err(HarnessError::Argument(_))
        ));
        assert!(matches!(
            TestNumberMap::from_json(JmsMessageType::Bytes, r#"[1, 2]"#),
            Err(HarnessError::Argument(_))
        ));
        assert!(matches!(
            TestNumberMap::from_json(JmsMessageType::Bytes, "{"),
            Err(HarnessError::JsonParser(_))
        ));
    }

    #[test]
    fn text_messages_accept_any_label() {
        let map = TestNumberMap::from_json(JmsMessageType::Text, r#"{"text": 2}"#).unwrap();
        assert_eq!(map.expected_total(), 2);
    }

    #[test]
    fn value_map_iterates_in_send_order() {
        let values = TestValueMap::from_value(
            JmsMessageType::Stream,
            &json!({"short": ["0001", "0002"], "boolean": ["True"]}),
        )
        .unwrap();
        let sent: Vec<_> = values
            .iter()
            .map(|(subtype, index, value)| (subtype.to_owned(), index, value.clone()))
            .collect();
        assert_eq!(
            sent,
            vec![
                ("short".to_owned(), 0, json!("0001")),
                ("short".to_owned(), 1, json!("0002")),
                ("boolean".to_owned(), 0, json!("True")),
            ]
        );
        assert_eq!(values.total(), 3);
        let numbers = values.number_map();
        assert_eq!(numbers.count("short"), 2);
        assert_eq!(numbers.sub_types(), values.sub_types());
    }
}
