const STATUS_SEGMENT: &str = "status/";

/// Extracts the canonical numeric status id from a raw id or a status URL.
///
/// Accepts either a bare decimal id ("1234567890") or any URL containing a
/// `status/<digits>` path segment. Returns `None` for anything else.
pub fn extract_status_id(input: &str) -> Option<String> {
    if input.is_empty() {
        return None;
    }

    if input.bytes().all(|b| b.is_ascii_digit()) {
        return Some(input.to_string());
    }

    input.match_indices(STATUS_SEGMENT).find_map(|(idx, _)| {
        let digits: String = input[idx + STATUS_SEGMENT.len()..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();

        (!digits.is_empty()).then_some(digits)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_id_passes_through() {
        assert_eq!(extract_status_id("123"), Some("123".to_string()));
        assert_eq!(
            extract_status_id("1846987139428635110"),
            Some("1846987139428635110".to_string())
        );
    }

    #[test]
    fn test_status_url_is_parsed() {
        assert_eq!(
            extract_status_id("https://x.com/u/status/456?x=1"),
            Some("456".to_string())
        );
        assert_eq!(
            extract_status_id("https://twitter.com/someone/status/789/photo/1"),
            Some("789".to_string())
        );
    }

    #[test]
    fn test_empty_and_garbage_yield_none() {
        assert_eq!(extract_status_id(""), None);
        assert_eq!(extract_status_id("abc"), None);
        assert_eq!(extract_status_id("https://example.com/nothing"), None);
    }

    #[test]
    fn test_status_segment_without_digits_yields_none() {
        assert_eq!(extract_status_id("https://x.com/u/status/abc"), None);
    }

    #[test]
    fn test_first_digit_bearing_segment_wins() {
        assert_eq!(
            extract_status_id("https://x.com/status/x/status/42"),
            Some("42".to_string())
        );
    }

    #[test]
    fn test_mixed_id_is_not_canonical() {
        // Not all digits, and no status/ segment either.
        assert_eq!(extract_status_id("123abc"), None);
    }
}
