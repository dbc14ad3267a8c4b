pub mod crc;
pub mod error;
pub mod payload;
pub mod reader;
pub mod tlv;
pub mod writer;
