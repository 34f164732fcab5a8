use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Bytes escaped in a query component (`application/x-www-form-urlencoded` minus
/// the `+` for space convention).
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'*');

/// Encodes query pairs into a query string, skipping pairs with empty values.
///
/// Pair order is preserved.
///
/// ```rust
/// use bitbucket_util::encode_query;
///
/// let pairs = vec![("q".to_string(), "name~main".to_string()), ("sort".to_string(), "-name".to_string())];
/// assert_eq!(encode_query(&pairs), "q=name%7Emain&sort=-name");
/// ```
pub fn encode_query(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_COMPONENT),
                utf8_percent_encode(value, QUERY_COMPONENT)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
