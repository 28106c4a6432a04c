//! GraphQL response envelopes.

use serde_json::Value;

use super::SubgraphError;

/// Extracts the `data` member of a GraphQL response envelope.
///
/// # Errors
///
/// - [`SubgraphError::Graphql`] if the envelope has a non-empty `errors`
///   array.
/// - [`SubgraphError::Malformed`] if `data` is missing or null.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::subgraph::data_from_envelope;
/// use serde_json::json;
///
/// let data = data_from_envelope(json!({"data": {"pools": []}})).expect("data present");
/// assert_eq!(data, json!({"pools": []}));
/// ```
pub fn data_from_envelope(mut envelope: Value) -> Result<Value, SubgraphError> {
    if let Some(errors) = envelope.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let messages = errors
                .iter()
                .map(|error| {
                    error
                        .get("message")
                        .and_then(Value::as_str)
                        .map_or_else(|| error.to_string(), str::to_string)
                })
                .collect();
            return Err(SubgraphError::Graphql(messages));
        }
    }
    match envelope.get_mut("data").map(Value::take) {
        None | Some(Value::Null) => Err(SubgraphError::Malformed("response has no data")),
        Some(data) => Ok(data),
    }
}
