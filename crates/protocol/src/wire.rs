//! Big-endian primitive writers shared by shapes, operations and messages.
//!
//! Fixed-width big-endian numbers, one byte booleans and strings as a `u16`
//! byte length followed by modified UTF-8.

use std::{borrow::Cow, io::Write};

use crate::{errors::EncodeError, primitives::Position};

/// Something with a fixed wire layout.
pub trait Encode {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), EncodeError>;

    /// Encode into a fresh buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::new();
        self.encode(&mut buf)?;
        Ok(buf)
    }
}

pub(crate) trait WriteExt: Write {
    fn put_i32(&mut self, value: i32) -> Result<(), EncodeError> {
        self.write_all(&value.to_be_bytes())?;
        Ok(())
    }

    fn put_u32(&mut self, value: u32) -> Result<(), EncodeError> {
        self.write_all(&value.to_be_bytes())?;
        Ok(())
    }

    fn put_f32(&mut self, value: f32) -> Result<(), EncodeError> {
        self.write_all(&value.to_be_bytes())?;
        Ok(())
    }

    fn put_f64(&mut self, value: f64) -> Result<(), EncodeError> {
        self.write_all(&value.to_be_bytes())?;
        Ok(())
    }

    fn put_bool(&mut self, value: bool) -> Result<(), EncodeError> {
        self.write_all(&[value as u8])?;
        Ok(())
    }

    /// Count prefix for a sequence of `len` items.
    fn put_count(&mut self, len: usize) -> Result<(), EncodeError> {
        let count = i32::try_from(len).map_err(|_| EncodeError::TooManyItems { len })?;
        self.put_i32(count)
    }

    fn put_position(&mut self, p: &Position) -> Result<(), EncodeError> {
        self.put_f64(p.x)?;
        self.put_f64(p.y)?;
        self.put_f64(p.z)
    }

    /// Count-prefixed run of positions.
    fn put_positions(&mut self, points: &[Position]) -> Result<(), EncodeError> {
        self.put_count(points.len())?;
        points.iter().try_for_each(|p| self.put_position(p))
    }

    /// `u16` byte length followed by the modified UTF-8 bytes.
    fn put_utf(&mut self, value: &str) -> Result<(), EncodeError> {
        let bytes = modified_utf8(value);
        let len = u16::try_from(bytes.len())
            .map_err(|_| EncodeError::StringTooLong { len: bytes.len() })?;
        self.write_all(&len.to_be_bytes())?;
        self.write_all(&bytes)?;
        Ok(())
    }
}

impl<W: Write + ?Sized> WriteExt for W {}

/// Modified UTF-8: NUL becomes `C0 80` and supplementary characters
/// are written as a pair of three byte surrogates.
pub(crate) fn modified_utf8(value: &str) -> Cow<'_, [u8]> {
    // 4 byte sequences lead with 0xF0..=0xF4
    if !value.bytes().any(|b| b == 0 || b >= 0xF0) {
        return Cow::Borrowed(value.as_bytes());
    }

    let mut out = Vec::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch as u32 {
            c @ 0x01..=0x7F => out.push(c as u8),
            c @ (0x00 | 0x80..=0x7FF) => {
                out.push(0xC0 | (c >> 6) as u8);
                out.push(0x80 | (c & 0x3F) as u8);
            }
            0x800..=0xFFFF => {
                let mut buf = [0u8; 3];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            _ => {
                let mut units = [0u16; 2];
                for &unit in ch.encode_utf16(&mut units).iter() {
                    push_three_byte(&mut out, unit);
                }
            }
        }
    }
    Cow::Owned(out)
}

fn push_three_byte(out: &mut Vec<u8>, unit: u16) {
    out.push(0xE0 | (unit >> 12) as u8);
    out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
    out.push(0x80 | (unit & 0x3F) as u8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_are_big_endian() {
        let mut buf = Vec::new();
        buf.put_i32(1).unwrap();
        buf.put_f32(4.0).unwrap();
        buf.put_f64(-2.5).unwrap();
        buf.put_bool(true).unwrap();

        assert_eq!(&buf[0..4], &[0, 0, 0, 1]);
        assert_eq!(&buf[4..8], &0x4080_0000u32.to_be_bytes());
        assert_eq!(&buf[8..16], &(-2.5f64).to_bits().to_be_bytes());
        assert_eq!(buf[16], 1);
        assert_eq!(buf.len(), 17);
    }

    #[test]
    fn test_ascii_string_is_plain_utf8() {
        let mut buf = Vec::new();
        buf.put_utf("ns:a").unwrap();
        assert_eq!(buf, [0, 4, b'n', b's', b':', b'a']);
    }

    #[test]
    fn test_bmp_text_matches_utf8() {
        let text = "café→✓";
        assert_eq!(modified_utf8(text).as_ref(), text.as_bytes());
    }

    #[test]
    fn test_nul_is_two_bytes() {
        assert_eq!(modified_utf8("a\0b").as_ref(), &[b'a', 0xC0, 0x80, b'b']);
    }

    #[test]
    fn test_supplementary_char_uses_surrogates() {
        // U+1F600 -> D83D DE00
        assert_eq!(
            modified_utf8("\u{1F600}").as_ref(),
            &[0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80]
        );
    }

    #[test]
    fn test_string_too_long_writes_nothing() {
        let long = "x".repeat(u16::MAX as usize + 1);
        let mut buf = Vec::new();
        let err = buf.put_utf(&long).unwrap_err();
        assert!(matches!(err, EncodeError::StringTooLong { len } if len == 65536));
        assert!(buf.is_empty());

        let max = "x".repeat(u16::MAX as usize);
        buf.put_utf(&max).unwrap();
        assert_eq!(&buf[0..2], &[0xFF, 0xFF]);
    }
}
