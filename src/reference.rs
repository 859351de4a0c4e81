//! Fixed-width word references and their packed hex form.
//!
//! A reference packs as `(page << index_bits) | index` into `reference_bits` bits and travels
//! as `hex_digits` uppercase hex characters. With the default 4:16 split this is the 20-bit,
//! five-digit code used on the radio link.

use crate::config::AddressWidth;
use crate::error::LbmsError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordRef {
    pub page: usize,
    pub index: usize,
}

impl WordRef {
    pub fn new(page: usize, index: usize) -> Self {
        Self { page, index }
    }

    /// Reference of the word at `position` in the vocabulary.
    pub fn from_position(position: usize, width: &AddressWidth) -> Self {
        let capacity = width.page_capacity();
        Self { page: position / capacity, index: position % capacity }
    }

    /// Whether both halves fit their bit fields.
    pub fn fits(&self, width: &AddressWidth) -> bool {
        self.index < width.page_capacity() && (self.page as u64) < width.max_pages()
    }

    pub fn pack(&self, width: &AddressWidth) -> Result<u32, LbmsError> {
        if !self.fits(width) {
            return Err(LbmsError::InvalidReference(format!(
                "{} does not fit a {} address",
                self, width
            )));
        }
        let code = ((self.page as u64) << width.index_bits()) | self.index as u64;
        Ok(code as u32)
    }

    pub fn unpack(code: u32, width: &AddressWidth) -> Result<Self, LbmsError> {
        let code = code as u64;
        if code >> width.reference_bits() != 0 {
            return Err(LbmsError::InvalidReference(format!(
                "code {:#x} is wider than {} bits",
                code,
                width.reference_bits()
            )));
        }
        let index_mask = (1u64 << width.index_bits()) - 1;
        Ok(Self {
            page: (code >> width.index_bits()) as usize,
            index: (code & index_mask) as usize,
        })
    }
}

impl fmt::Display for WordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.page, self.index)
    }
}

/// Concatenate the packed hex form of each reference.
pub fn encode_hex(refs: &[WordRef], width: &AddressWidth) -> Result<String, LbmsError> {
    let digits = width.hex_digits();
    let mut out = String::with_capacity(refs.len() * digits);
    for word_ref in refs {
        let code = word_ref.pack(width)?;
        out.push_str(&format!("{:0digits$X}", code, digits = digits));
    }
    Ok(out)
}

/// Split a payload into fixed-width hex segments and unpack each one.
pub fn decode_hex(payload: &str, width: &AddressWidth) -> Result<Vec<WordRef>, LbmsError> {
    let digits = width.hex_digits();
    if !payload.is_ascii() || payload.len() % digits != 0 {
        return Err(LbmsError::InvalidReference(format!(
            "payload of {} characters is not a whole number of {}-digit references",
            payload.len(),
            digits
        )));
    }

    payload
        .as_bytes()
        .chunks(digits)
        .map(|segment| {
            // ascii checked above
            let segment = std::str::from_utf8(segment).unwrap_or_default();
            if !segment.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(LbmsError::InvalidReference(format!("bad hex segment: {}", segment)));
            }
            let code = u32::from_str_radix(segment, 16)
                .map_err(|_| LbmsError::InvalidReference(format!("bad hex segment: {}", segment)))?;
            WordRef::unpack(code, width)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_twenty_bit_reference() {
        let width = AddressWidth::default();
        let word_ref = WordRef::new(3, 0xBEEF);
        let code = word_ref.pack(&width).unwrap();
        assert_eq!(code, 0x3BEEF);
        assert_eq!(WordRef::unpack(code, &width).unwrap(), word_ref);
    }

    #[test]
    fn rejects_fields_that_do_not_fit() {
        let width = AddressWidth::new(1, 2).unwrap();
        assert!(WordRef::new(0, 4).pack(&width).is_err());
        assert!(WordRef::new(2, 0).pack(&width).is_err());
        assert!(WordRef::unpack(0b1000, &width).is_err());
    }

    #[test]
    fn position_maps_to_page_and_index() {
        let width = AddressWidth::new(2, 2).unwrap();
        assert_eq!(WordRef::from_position(0, &width), WordRef::new(0, 0));
        assert_eq!(WordRef::from_position(4, &width), WordRef::new(1, 0));
        assert_eq!(WordRef::from_position(7, &width), WordRef::new(1, 3));
    }

    #[test]
    fn hex_uses_five_digits_by_default() {
        let width = AddressWidth::default();
        let refs = [WordRef::new(0, 1), WordRef::new(15, 0xFFFF)];
        let hex = encode_hex(&refs, &width).unwrap();
        assert_eq!(hex, "00001FFFFF");
        assert_eq!(decode_hex(&hex, &width).unwrap(), refs);
    }

    #[test]
    fn decode_rejects_ragged_or_bad_payloads() {
        let width = AddressWidth::default();
        assert!(decode_hex("0000", &width).is_err());
        assert!(decode_hex("0000G", &width).is_err());
        assert!(decode_hex("+0001", &width).is_err());
        assert!(decode_hex("-0001", &width).is_err());
        assert!(decode_hex("", &width).unwrap().is_empty());
    }

    #[test]
    fn full_width_reference_round_trips() {
        let width = AddressWidth::new(16, 16).unwrap();
        let word_ref = WordRef::new(0xFFFF, 0xFFFF);
        assert_eq!(word_ref.pack(&width).unwrap(), u32::MAX);
        assert_eq!(WordRef::unpack(u32::MAX, &width).unwrap(), word_ref);
    }
}
