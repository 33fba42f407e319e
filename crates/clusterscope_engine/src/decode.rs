use std::fmt;

use clusterscope_core::AnalysisResult;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
#[error("invalid analysis response: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Cluster map in the order the keys appear on the wire.
struct OrderedClusters(Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for OrderedClusters {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ClustersVisitor;

        impl<'de> Visitor<'de> for ClustersVisitor {
            type Value = OrderedClusters;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping cluster ids to arrays of sentences")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((id, sentences)) = map.next_entry::<String, Vec<String>>()? {
                    // Later duplicates win, like assigning the same key twice.
                    match entries.iter_mut().find(|(existing, _)| *existing == id) {
                        Some((_, slot)) => *slot = sentences,
                        None => entries.push((id, sentences)),
                    }
                }
                Ok(OrderedClusters(entries))
            }
        }

        deserializer.deserialize_map(ClustersVisitor)
    }
}

/// Parses the `/analyze` JSON body into display-ordered clusters.
pub fn decode_analysis_result(bytes: &[u8]) -> Result<AnalysisResult, DecodeError> {
    let OrderedClusters(entries) = serde_json::from_slice(bytes)?;
    Ok(AnalysisResult::from_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::decode_analysis_result;

    fn ids(body: &str) -> Vec<String> {
        decode_analysis_result(body.as_bytes())
            .unwrap()
            .clusters()
            .iter()
            .map(|c| c.id.clone())
            .collect()
    }

    #[test]
    fn numeric_ids_sort_numerically() {
        assert_eq!(ids(r#"{"10": ["a"], "2": ["b"], "0": ["c"]}"#), vec!["0", "2", "10"]);
    }

    #[test]
    fn named_ids_keep_response_order() {
        assert_eq!(ids(r#"{"zeta": [], "1": ["x"], "alpha": []}"#), vec!["1", "zeta", "alpha"]);
    }

    #[test]
    fn duplicate_keys_keep_first_position_and_last_value() {
        let result = decode_analysis_result(br#"{"a": ["1"], "b": ["2"], "a": ["3"]}"#).unwrap();
        assert_eq!(result.clusters()[0].id, "a");
        assert_eq!(result.clusters()[0].sentences, vec!["3"]);
    }

    #[test]
    fn rejects_non_object_and_non_string_sentences() {
        assert!(decode_analysis_result(b"[]").is_err());
        assert!(decode_analysis_result(br#"{"0": [1, 2]}"#).is_err());
        assert!(decode_analysis_result(br#"{"0": "a"}"#).is_err());
        assert!(decode_analysis_result(b"not json").is_err());
    }

    #[test]
    fn empty_object_is_an_empty_result() {
        assert!(decode_analysis_result(b"{}").unwrap().is_empty());
    }
}
