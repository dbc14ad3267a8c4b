use crate::error::{BrCodeError, Result};
use crate::payload::Charge;
use std::io::Read;

/// Reads charges from a CSV source (`txid,amount,description`).
///
/// Wraps `csv::Reader` and provides an iterator over `Result<Charge>`.
/// Whitespace is trimmed and the description column may be left empty or
/// omitted entirely.
pub struct ChargeReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ChargeReader<R> {
    /// Creates a new `ChargeReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes charges.
    pub fn charges(self) -> impl Iterator<Item = Result<Charge>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(BrCodeError::from))
    }
}
