use std::collections::HashMap;

/// Parse query parameters from a URI string.
///
/// Handles URL decoding and returns a HashMap of parameter key-value pairs.
/// Multiple values for the same key are not supported (only the last is kept).
///
/// # Example
/// ```
/// use anim8::core::query_params::parse_query_params;
///
/// let params = parse_query_params("/users/search?q=ada&limit=5");
/// assert_eq!(params.get("q"), Some(&"ada".to_string()));
/// assert_eq!(params.get("limit"), Some(&"5".to_string()));
/// ```
pub fn parse_query_params(uri: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();

    if let Some(query_start) = uri.find('?') {
        let query = &uri[query_start + 1..];
        for param in query.split('&') {
            if let Some(eq_idx) = param.find('=') {
                let key = &param[..eq_idx];
                let encoded_value = &param[eq_idx + 1..];
                let decoded = urlencoding::decode(encoded_value)
                    .unwrap_or(std::borrow::Cow::Borrowed(encoded_value))
                    .to_string();
                params.insert(key.to_string(), decoded);
            } else {
                // Flag parameter without value
                params.insert(param.to_string(), String::new());
            }
        }
    }

    params
}

/// Get a string parameter from parsed query params with optional default
pub fn get_string(params: &HashMap<String, String>, key: &str, default: Option<&str>) -> Option<String> {
    params.get(key)
        .map(|s| s.clone())
        .or_else(|| default.map(|d| d.to_string()))
}

/// Get a non-negative integer parameter with a default (offsets start at 0)
pub fn get_usize(params: &HashMap<String, String>, key: &str, default: usize) -> usize {
    params.get(key)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiple_params() {
        let params = parse_query_params("/animations?limit=10&skip=20");
        assert_eq!(get_usize(&params, "limit", 50), 10);
        assert_eq!(get_usize(&params, "skip", 0), 20);
    }

    #[test]
    fn decodes_url_encoding() {
        let params = parse_query_params("/users/search?q=css%20master");
        assert_eq!(params.get("q"), Some(&"css master".to_string()));
    }

    #[test]
    fn missing_params_fall_back_to_defaults() {
        let params = parse_query_params("/animations");
        assert_eq!(get_usize(&params, "limit", 50), 50);
        assert_eq!(get_usize(&params, "skip", 0), 0);
        assert_eq!(get_string(&params, "token", None), None);
    }

    #[test]
    fn malformed_numbers_use_default() {
        let params = parse_query_params("/animations?limit=abc&skip=-3");
        assert_eq!(get_usize(&params, "limit", 50), 50);
        assert_eq!(get_usize(&params, "skip", 0), 0);
    }
}
