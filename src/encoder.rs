//! Size models for one message under each transmission scheme.

use crate::config::{AddressWidth, DelimiterPolicy};
use crate::error::LbmsError;

/// A transmission scheme that can price a message.
pub trait SizeEstimator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Transmitted size of `message`. Must be deterministic and side-effect free.
    fn encode(&self, message: &[&str]) -> Result<f64, LbmsError>;
}

fn validate_message(message: &[&str]) -> Result<(), LbmsError> {
    for (position, word) in message.iter().enumerate() {
        if word.is_empty() {
            return Err(LbmsError::InvalidMessage(format!("word {} is empty", position)));
        }
        if word.chars().any(char::is_whitespace) {
            return Err(LbmsError::InvalidMessage(format!(
                "word {} ({:?}) contains whitespace",
                position, word
            )));
        }
    }
    Ok(())
}

/// Word-reference scheme: every word costs one fixed-width reference, in bytes.
#[derive(Debug, Clone, Copy)]
pub struct DictionaryEncoder {
    width: AddressWidth,
}

impl DictionaryEncoder {
    pub fn new(width: AddressWidth) -> Self {
        Self { width }
    }

    pub fn reference_byte_width(&self) -> f64 {
        self.width.reference_byte_width()
    }
}

impl SizeEstimator for DictionaryEncoder {
    fn name(&self) -> &'static str {
        "dict"
    }

    fn encode(&self, message: &[&str]) -> Result<f64, LbmsError> {
        validate_message(message)?;
        Ok(message.len() as f64 * self.width.reference_byte_width())
    }
}

/// Raw baseline: every character sent as two hex digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawEncoder {
    delimiters: DelimiterPolicy,
}

impl RawEncoder {
    pub fn new(delimiters: DelimiterPolicy) -> Self {
        Self { delimiters }
    }
}

impl SizeEstimator for RawEncoder {
    fn name(&self) -> &'static str {
        "raw"
    }

    fn encode(&self, message: &[&str]) -> Result<f64, LbmsError> {
        validate_message(message)?;
        let mut chars: usize = message.iter().map(|w| w.chars().count()).sum();
        if self.delimiters == DelimiterPolicy::Count {
            chars += message.len().saturating_sub(1);
        }
        Ok((chars * 2) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_size_is_words_times_width() {
        let encoder = DictionaryEncoder::new(AddressWidth::default());
        assert_eq!(encoder.encode(&["a", "to"]).unwrap(), 5.0);
        assert_eq!(encoder.encode(&[]).unwrap(), 0.0);
    }

    #[test]
    fn dictionary_width_follows_address_split() {
        let encoder = DictionaryEncoder::new(AddressWidth::new(2, 10).unwrap());
        assert_eq!(encoder.reference_byte_width(), 1.5);
        assert_eq!(encoder.encode(&["x", "y", "z"]).unwrap(), 4.5);
    }

    #[test]
    fn raw_size_is_two_hex_digits_per_char() {
        let encoder = RawEncoder::default();
        assert_eq!(encoder.encode(&["a", "to"]).unwrap(), 6.0);
        assert_eq!(encoder.encode(&[]).unwrap(), 0.0);
        assert_eq!(encoder.encode(&["café"]).unwrap(), 8.0);
    }

    #[test]
    fn raw_delimiters_are_opt_in() {
        let encoder = RawEncoder::new(DelimiterPolicy::Count);
        assert_eq!(encoder.encode(&["a", "to"]).unwrap(), 8.0);
        assert_eq!(encoder.encode(&["a"]).unwrap(), 2.0);
        assert_eq!(encoder.encode(&[]).unwrap(), 0.0);
    }

    #[test]
    fn encoders_are_deterministic() {
        let message = ["emergency", "at", "the", "bridge"];
        let encoders: [Box<dyn SizeEstimator>; 2] = [
            Box::new(DictionaryEncoder::new(AddressWidth::default())),
            Box::new(RawEncoder::default()),
        ];
        for encoder in &encoders {
            assert_eq!(encoder.encode(&message).unwrap(), encoder.encode(&message).unwrap());
        }
    }

    #[test]
    fn malformed_words_are_rejected() {
        let dict = DictionaryEncoder::new(AddressWidth::default());
        let raw = RawEncoder::default();
        for message in [&["ok", ""][..], &["two words"][..]] {
            assert!(matches!(dict.encode(message), Err(LbmsError::InvalidMessage(_))));
            assert!(matches!(raw.encode(message), Err(LbmsError::InvalidMessage(_))));
        }
    }
}
