use crate::crc;
use crate::error::{BrCodeError, Result};
use crate::tlv;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Domain identifier for the Pix merchant account information template.
const PIX_GUI: &str = "BR.GOV.BCB.PIX";

/// Checksum field tag and length, appended before the CRC is computed and
/// therefore covered by it.
const CRC_MARKER: &str = "6304";

/// The recipient profile embedded in every payload.
///
/// Serde support allows a profile to be loaded from a JSON file, so multiple
/// merchants can share one binary without recompiling.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Merchant {
    /// Pix key: e-mail, phone number or random key.
    pub key: String,
    /// Rendered upper-case in the payload, conventionally at most 25 chars.
    pub name: String,
    /// Rendered upper-case in the payload, conventionally at most 15 chars.
    pub city: String,
}

/// A single payment request to encode.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Charge {
    /// Reconciliation id, at most 25 chars on the caller's side.
    pub txid: String,
    pub amount: Decimal,
    /// Free-text supplementary info. Absent or empty means the sub-field is
    /// omitted from the payload entirely.
    pub description: Option<String>,
}

/// Builds the complete BR Code payload for one charge.
///
/// Top-level fields are emitted in ascending tag order as the format
/// mandates, ending with tag 63 whose value is the CRC16 of everything
/// before it, including the `6304` marker itself. The result is a pure
/// function of the inputs; on any error no partial payload is returned.
pub fn build(merchant: &Merchant, charge: &Charge) -> Result<String> {
    if merchant.key.is_empty() {
        return Err(BrCodeError::Validation(
            "recipient key must not be empty".to_string(),
        ));
    }
    if charge.amount < Decimal::ZERO {
        return Err(BrCodeError::Validation(format!(
            "amount must not be negative: {}",
            charge.amount
        )));
    }

    // Field 26: merchant account information template. The outer length is
    // recomputed over the nested records, tag+length overhead included.
    let mut account_info = String::new();
    account_info.push_str(&tlv::encode("00", PIX_GUI)?);
    account_info.push_str(&tlv::encode("01", &merchant.key)?);
    if let Some(description) = charge.description.as_deref().filter(|d| !d.is_empty()) {
        account_info.push_str(&tlv::encode("02", description)?);
    }

    let mut payload = String::new();
    // Field 00: payload format indicator (fixed "01")
    payload.push_str(&tlv::encode("00", "01")?);
    // Field 01: point of initiation method ("12" = one-time use indication)
    payload.push_str(&tlv::encode("01", "12")?);
    payload.push_str(&tlv::encode("26", &account_info)?);
    // Field 52: merchant category code placeholder
    payload.push_str(&tlv::encode("52", "0000")?);
    // Field 53: ISO 4217 numeric code for BRL
    payload.push_str(&tlv::encode("53", "986")?);
    payload.push_str(&tlv::encode("54", &format_amount(charge.amount))?);
    payload.push_str(&tlv::encode("58", "BR")?);
    payload.push_str(&tlv::encode("59", &merchant.name.to_uppercase())?);
    payload.push_str(&tlv::encode("60", &merchant.city.to_uppercase())?);
    // Field 62: additional data template holding the txid
    payload.push_str(&tlv::encode("62", &tlv::encode("05", &charge.txid)?)?);

    // Field 63: the CRC covers the whole payload up to and including "6304"
    payload.push_str(CRC_MARKER);
    let crc = crc::checksum(&payload);
    payload.push_str(&crc);
    Ok(payload)
}

/// Renders the amount with exactly two fractional digits and `.` as the
/// decimal point, rounding half away from zero.
fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn merchant() -> Merchant {
        Merchant {
            key: "user@example.com".to_string(),
            name: "JOHN SMITH".to_string(),
            city: "SAO PAULO".to_string(),
        }
    }

    fn charge(amount: Decimal) -> Charge {
        Charge {
            txid: "TEST123".to_string(),
            amount,
            description: None,
        }
    }

    #[test]
    fn test_known_payload_structure() {
        let payload = build(&merchant(), &charge(dec!(10.00))).unwrap();

        let expected_prefix = concat!(
            "000201",
            "010212",
            "2638",
            "0014BR.GOV.BCB.PIX",
            "0116user@example.com",
            "52040000",
            "5303986",
            "540510.00",
            "5802BR",
            "5910JOHN SMITH",
            "5909SAO PAULO",
            "62110507TEST123",
            "6304",
        );
        assert!(
            payload.starts_with(expected_prefix),
            "unexpected payload: {payload}"
        );
        // Nothing after the 4 checksum digits
        assert_eq!(payload.len(), expected_prefix.len() + 4);
    }

    #[test]
    fn test_checksum_covers_preceding_payload() {
        let payload = build(&merchant(), &charge(dec!(10.00))).unwrap();
        let (body, crc) = payload.split_at(payload.len() - 4);
        assert!(body.ends_with("6304"));
        assert_eq!(crc, crc::checksum(body));
    }

    #[test]
    fn test_deterministic_output() {
        let first = build(&merchant(), &charge(dec!(3299.90))).unwrap();
        let second = build(&merchant(), &charge(dec!(3299.90))).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_amount_rendered_with_two_decimals() {
        let payload = build(&merchant(), &charge(dec!(3299.9))).unwrap();
        assert!(payload.contains("54073299.90"));

        let payload = build(&merchant(), &charge(dec!(0))).unwrap();
        assert!(payload.contains("54040.00"));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = build(&merchant(), &charge(dec!(-1.00))).unwrap_err();
        assert!(matches!(err, BrCodeError::Validation(_)));
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut merchant = merchant();
        merchant.key.clear();
        let err = build(&merchant, &charge(dec!(10.00))).unwrap_err();
        assert!(matches!(err, BrCodeError::Validation(_)));
    }

    #[test]
    fn test_description_adds_sub_record() {
        let mut charge = charge(dec!(199.00));
        charge.description = Some("Presente: Panela".to_string());
        let payload = build(&merchant(), &charge).unwrap();
        assert!(payload.contains("0216Presente: Panela"));
    }

    #[test]
    fn test_empty_description_omitted() {
        let mut with_empty = charge(dec!(199.00));
        with_empty.description = Some(String::new());
        let without = charge(dec!(199.00));
        assert_eq!(
            build(&merchant(), &with_empty).unwrap(),
            build(&merchant(), &without).unwrap()
        );
    }

    #[test]
    fn test_merchant_fields_upper_cased() {
        let merchant = Merchant {
            key: "user@example.com".to_string(),
            name: "john smith".to_string(),
            city: "sao paulo".to_string(),
        };
        let payload = build(&merchant, &charge(dec!(10.00))).unwrap();
        assert!(payload.contains("5910JOHN SMITH"));
        assert!(payload.contains("5909SAO PAULO"));
    }

    #[test]
    fn test_oversized_nested_template_rejected() {
        let mut merchant = merchant();
        // Key fits its own record but pushes the tag-26 template past 99
        merchant.key = "k".repeat(90);
        let err = build(&merchant, &charge(dec!(10.00))).unwrap_err();
        assert!(matches!(err, BrCodeError::FieldTooLong { tag: "26", .. }));
    }

    #[test]
    fn test_non_ascii_key_rejected() {
        let mut merchant = merchant();
        merchant.key = "usuário@example.com".to_string();
        let err = build(&merchant, &charge(dec!(10.00))).unwrap_err();
        assert!(matches!(err, BrCodeError::NonAscii { tag: "01" }));
    }

    #[test]
    fn test_merchant_profile_json_round_trip() {
        let json = r#"{"key":"user@example.com","name":"JOHN SMITH","city":"SAO PAULO"}"#;
        let parsed: Merchant = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, merchant());
    }
}
