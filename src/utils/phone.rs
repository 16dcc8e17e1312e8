// src/utils/phone.rs

/// Turns a locally typed Indonesian number into the form WhatsApp expects.
///
/// `0812...` becomes `62812...`, `+62812...` becomes `62812...`, anything else
/// is passed through untouched. No digit validation happens here.
pub fn normalize(raw: &str) -> String {
    if let Some(rest) = raw.strip_prefix('0') {
        format!("62{}", rest)
    } else if raw.starts_with("+62") {
        raw[1..].to_string()
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn test_local_prefix_becomes_country_code() {
        assert_eq!(normalize("0812345"), "62812345");
        assert_eq!(normalize("081234567890"), "6281234567890");
    }

    #[test]
    fn test_only_first_zero_is_replaced() {
        assert_eq!(normalize("00812"), "620812");
        assert_eq!(normalize("0"), "62");
    }

    #[test]
    fn test_plus_is_dropped() {
        assert_eq!(normalize("+62812345"), "62812345");
    }

    #[test]
    fn test_other_formats_pass_through() {
        assert_eq!(normalize("62812345"), "62812345");
        assert_eq!(normalize("+1 415 555 1212"), "+1 415 555 1212");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("812-345"), "812-345");
    }
}
