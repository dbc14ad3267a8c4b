use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// One generated payload, keyed by the charge's txid.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct PayloadRecord {
    pub txid: String,
    pub payload: String,
}

/// Writes payload records as CSV (`txid,payload`) to any `Write` sink.
pub struct PayloadWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PayloadWriter<W> {
    pub fn new(dest: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(dest),
        }
    }

    pub fn write(&mut self, record: &PayloadRecord) -> Result<()> {
        self.writer.serialize(record)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
