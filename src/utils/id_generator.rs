// src/utils/id_generator.rs
use chrono::{DateTime, Utc};
#[cfg(test)]
use chrono::NaiveDate;
use rand::Rng;

const RECEIPT_PREFIX: &str = "msg";

pub struct IdGenerator;

impl IdGenerator {
    /// Generate a delivery receipt ID with format: msg-{YYMMDD}-{random_suffix}
    pub fn receipt_id() -> String {
        Self::receipt_id_at(Utc::now())
    }

    /// Generate a receipt ID with a specific timestamp (useful for testing)
    pub fn receipt_id_at(timestamp: DateTime<Utc>) -> String {
        let date_part = timestamp.format("%y%m%d").to_string();
        format!("{}-{}-{}", RECEIPT_PREFIX, date_part, Self::random_suffix())
    }

    /// 5 characters: 3 hex + 2 alphanumeric, or 3 alphanumeric + 2 hex
    fn random_suffix() -> String {
        if rand::random::<bool>() {
            format!("{}{}", Self::hex_chars(3), Self::alphanumeric_chars(2))
        } else {
            format!("{}{}", Self::alphanumeric_chars(3), Self::hex_chars(2))
        }
    }

    fn hex_chars(n: usize) -> String {
        const HEX_CHARS: &[u8] = b"0123456789abcdef";
        Self::from_chars(HEX_CHARS, n)
    }

    fn alphanumeric_chars(n: usize) -> String {
        const ALPHANUMERIC_CHARS: &[u8] =
            b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
        Self::from_chars(ALPHANUMERIC_CHARS, n)
    }

    fn from_chars(charset: &[u8], n: usize) -> String {
        let mut rng = rand::rng();
        (0..n)
            .map(|_| charset[rng.random_range(0..charset.len())] as char)
            .collect()
    }
}

#[cfg(test)]
impl IdGenerator {
    /// Returns the send date encoded in a receipt ID, if it is well formed.
    pub fn parse_receipt_date(id: &str) -> Option<NaiveDate> {
        let mut parts = id.split('-');
        let (prefix, date_part, suffix) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() || prefix != RECEIPT_PREFIX || suffix.len() != 5 {
            return None;
        }
        if date_part.len() != 6 || !date_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let year = 2000 + date_part[0..2].parse::<i32>().ok()?;
        let month = date_part[2..4].parse::<u32>().ok()?;
        let day = date_part[4..6].parse::<u32>().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    pub fn is_receipt_id(id: &str) -> bool {
        Self::parse_receipt_date(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_receipt_id_format() {
        let id = IdGenerator::receipt_id();
        assert!(id.starts_with("msg-"));
        assert_eq!(id.split('-').count(), 3);
        assert!(IdGenerator::is_receipt_id(&id));
    }

    #[test]
    fn test_receipt_date_roundtrip() {
        let sent = Utc.with_ymd_and_hms(2025, 5, 5, 9, 30, 0).unwrap();
        let id = IdGenerator::receipt_id_at(sent);
        assert_eq!(
            IdGenerator::parse_receipt_date(&id),
            NaiveDate::from_ymd_opt(2025, 5, 5)
        );
    }

    #[test]
    fn test_rejects_foreign_ids() {
        assert!(!IdGenerator::is_receipt_id("job-231207-a1b2c"));
        assert!(!IdGenerator::is_receipt_id("msg-231399-a1b2c"));
        assert!(!IdGenerator::is_receipt_id("invalid-format"));
    }

    #[test]
    fn test_random_suffix_pattern() {
        for _ in 0..100 {
            let suffix = IdGenerator::random_suffix();
            assert_eq!(suffix.len(), 5);
            assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()), "bad suffix: {}", suffix);
        }
    }
}
