use crate::error::{BrCodeError, Result};

/// A two-digit decimal length prefix caps every value at 99 characters.
pub const MAX_VALUE_LEN: usize = 99;

/// Encodes a single `tag || length || value` record.
///
/// The length is the value's character count, zero-padded to two digits.
/// Values are required to be ASCII so the declared length can never diverge
/// from the byte count seen by the checksum and by scanning applications.
/// Oversized values are a hard error, never truncated: a truncated value
/// would still pass the checksum while meaning something else.
pub fn encode(tag: &'static str, value: &str) -> Result<String> {
    if !value.is_ascii() {
        return Err(BrCodeError::NonAscii { tag });
    }
    let len = value.len();
    if len > MAX_VALUE_LEN {
        return Err(BrCodeError::FieldTooLong { tag, len });
    }
    Ok(format!("{tag}{len:02}{value}"))
}
