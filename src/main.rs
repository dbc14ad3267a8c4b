use brcode::payload::{self, Merchant};
use brcode::reader::ChargeReader;
use brcode::writer::{PayloadRecord, PayloadWriter};
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

/// Pix txids are consumed up to 25 characters; longer ones are truncated
/// here before they reach the encoder.
const MAX_TXID_LEN: usize = 25;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input charges CSV file (txid, amount, description)
    input: PathBuf,

    /// Merchant profile JSON file ({"key","name","city"})
    #[arg(long, conflicts_with_all = ["key", "name", "city"])]
    merchant: Option<PathBuf>,

    /// Pix key of the recipient (e-mail, phone or random key)
    #[arg(long, required_unless_present = "merchant")]
    key: Option<String>,

    /// Merchant name (rendered upper-case in the payload)
    #[arg(long, required_unless_present = "merchant")]
    name: Option<String>,

    /// Merchant city (rendered upper-case in the payload)
    #[arg(long, required_unless_present = "merchant")]
    city: Option<String>,

    /// Emit JSON lines instead of CSV
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let merchant: Merchant = if let Some(path) = &cli.merchant {
        let file = File::open(path).into_diagnostic()?;
        serde_json::from_reader(file).into_diagnostic()?
    } else {
        Merchant {
            key: cli.key.clone().unwrap_or_default(),
            name: cli.name.clone().unwrap_or_default(),
            city: cli.city.clone().unwrap_or_default(),
        }
    };

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = ChargeReader::new(file);

    let mut records = Vec::new();
    for result in reader.charges() {
        match result {
            Ok(mut charge) => {
                if charge.txid.is_ascii() && charge.txid.len() > MAX_TXID_LEN {
                    charge.txid.truncate(MAX_TXID_LEN);
                }
                match payload::build(&merchant, &charge) {
                    Ok(code) => records.push(PayloadRecord {
                        txid: charge.txid,
                        payload: code,
                    }),
                    Err(e) => {
                        eprintln!("Error building payload for {}: {}", charge.txid, e);
                    }
                }
            }
            Err(e) => {
                eprintln!("Error reading charge: {}", e);
            }
        }
    }

    let stdout = io::stdout();
    if cli.json {
        let mut out = stdout.lock();
        for record in &records {
            let line = serde_json::to_string(record).into_diagnostic()?;
            writeln!(out, "{line}").into_diagnostic()?;
        }
    } else {
        let mut writer = PayloadWriter::new(stdout.lock());
        for record in &records {
            writer.write(record).into_diagnostic()?;
        }
        writer.flush().into_diagnostic()?;
    }

    Ok(())
}
