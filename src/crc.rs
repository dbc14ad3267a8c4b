use ::crc::{CRC_16_IBM_3740, Crc};

// CRC-16/CCITT-FALSE: init 0xFFFF, poly 0x1021, MSB-first, no reflection,
// no final XOR. The registry name in the `crc` crate is CRC_16_IBM_3740.
const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// Computes the payload checksum, rendered as 4 uppercase hex digits.
pub fn checksum(payload: &str) -> String {
    format!("{:04X}", CRC16.checksum(payload.as_bytes()))
}
