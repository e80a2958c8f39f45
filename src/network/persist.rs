//! Two-record weight file.
//!
//! Record 1 is the shape fingerprint `input_count, output_count,
//! hidden_layer_count, hidden_layer_size`. Record 2 carries one field per
//! weight matrix (matrix 0 first), each the lowercase hex of
//! [`Matrix::to_bytes`]. Hex keeps the fields free of quotes, commas and
//! newlines, so any CSV reader hands them back byte for byte.

use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;
use crate::network::config::{NetworkConfig, ShapeFingerprint};
use crate::network::weights::WeightStore;

/// Writes the fingerprint of `config` followed by every matrix in `weights`.
pub fn save_to_writer<W: Write>(writer: W, config: &NetworkConfig, weights: &WeightStore) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().flexible(true).from_writer(writer);

    let fingerprint: Vec<String> = config
        .fingerprint()
        .as_array()
        .iter()
        .map(usize::to_string)
        .collect();
    csv_writer.write_record(&fingerprint)?;

    let layers: Vec<String> = weights
        .layers()
        .iter()
        .map(|m| encode_hex(&m.to_bytes()))
        .collect();
    csv_writer.write_record(&layers)?;

    csv_writer.flush()?;
    Ok(())
}

/// Reads a weight file written by [`save_to_writer`] and checks it against
/// `config`.
///
/// The fingerprint is compared field by field before any matrix is decoded;
/// the first differing field is reported as [`NetError::ShapeMismatch`].
pub fn load_from_reader<R: Read>(reader: R, config: &NetworkConfig) -> Result<WeightStore> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = csv_reader.records();

    let header = records
        .next()
        .ok_or_else(|| NetError::CorruptWeights("missing shape fingerprint record".into()))??;
    check_fingerprint(&header, &config.fingerprint())?;

    let payload = records
        .next()
        .ok_or_else(|| NetError::CorruptWeights("missing weight matrix record".into()))??;
    if payload.len() != config.layer_count() {
        return Err(NetError::CorruptWeights(format!(
            "found {} weight matrices, network has {}",
            payload.len(),
            config.layer_count()
        )));
    }

    let matrices = payload
        .iter()
        .map(|field| Matrix::from_bytes(&decode_hex(field)?))
        .collect::<Result<Vec<Matrix>>>()?;
    WeightStore::from_matrices(config, matrices)
}

fn check_fingerprint(record: &StringRecord, live: &ShapeFingerprint) -> Result<()> {
    if record.len() != 4 {
        return Err(NetError::CorruptWeights(format!(
            "shape fingerprint has {} fields, expected 4",
            record.len()
        )));
    }
    for ((raw, &expected), field) in record
        .iter()
        .zip(live.as_array().iter())
        .zip(ShapeFingerprint::FIELD_NAMES)
    {
        let found: usize = raw.trim().parse().map_err(|_| {
            NetError::CorruptWeights(format!("{field} '{raw}' is not a non-negative integer"))
        })?;
        if found != expected {
            return Err(NetError::ShapeMismatch { field, expected, found });
        }
    }
    Ok(())
}

fn encode_hex(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(DIGITS[(b >> 4) as usize] as char);
        out.push(DIGITS[(b & 0x0f) as usize] as char);
    }
    out
}

fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    if text.len() % 2 != 0 {
        return Err(NetError::CorruptWeights("odd-length hex field".into()));
    }
    text.as_bytes()
        .chunks_exact(2)
        .map(|pair| Ok((hex_value(pair[0])? << 4) | hex_value(pair[1])?))
        .collect()
}

fn hex_value(c: u8) -> Result<u8> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(NetError::CorruptWeights(format!("invalid hex digit '{}'", c as char))),
    }
}
