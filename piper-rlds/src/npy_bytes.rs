//! Fixed-width byte-string records in the npy format.
//!
//! `ndarray-npy` covers the numeric dtypes; per-step instruction strings
//! need NumPy's `|S` record dtype, which this module encodes and decodes
//! directly.
use anyhow::{anyhow, bail, Result};
use std::io::{Read, Write};

const MAGIC: &[u8] = b"\x93NUMPY";

/// Writes `rows` as a 1-D array of dtype `|S<width>`.
///
/// The record width is the longest row, at least one byte since NumPy
/// rejects zero-width records. Shorter rows are padded with NUL bytes, which
/// NumPy strips on read.
pub fn write_bytes_npy<W: Write>(writer: &mut W, rows: &[Vec<u8>]) -> Result<()> {
    let width = rows.iter().map(|row| row.len()).max().unwrap_or(0).max(1);
    let mut header = format!(
        "{{'descr': '|S{}', 'fortran_order': False, 'shape': ({},), }}",
        width,
        rows.len()
    )
    .into_bytes();

    // The preamble (magic, version, length, header) must be a multiple of
    // 64 bytes, space-padded and newline-terminated.
    let preamble = MAGIC.len() + 2 + 2 + header.len() + 1;
    header.extend(std::iter::repeat(b' ').take((64 - preamble % 64) % 64));
    header.push(b'\n');

    writer.write_all(MAGIC)?;
    writer.write_all(&[0x01, 0x00])?;
    writer.write_all(&(header.len() as u16).to_le_bytes())?;
    writer.write_all(&header)?;

    for row in rows {
        writer.write_all(row)?;
        if row.len() < width {
            writer.write_all(&vec![0u8; width - row.len()])?;
        }
    }
    Ok(())
}

/// Reads a 1-D `|S` array back into its rows, trailing NULs stripped.
pub fn read_bytes_npy<R: Read>(reader: &mut R) -> Result<Vec<Vec<u8>>> {
    let mut magic = [0u8; 6];
    reader.read_exact(&mut magic)?;
    if magic != *MAGIC {
        bail!("not an npy file");
    }

    let mut version = [0u8; 2];
    reader.read_exact(&mut version)?;
    let header_len = match version[0] {
        1 => {
            let mut len = [0u8; 2];
            reader.read_exact(&mut len)?;
            u16::from_le_bytes(len) as usize
        }
        2 | 3 => {
            let mut len = [0u8; 4];
            reader.read_exact(&mut len)?;
            u32::from_le_bytes(len) as usize
        }
        other => bail!("unsupported npy format version {}", other),
    };

    let mut header = vec![0u8; header_len];
    reader.read_exact(&mut header)?;
    let header = String::from_utf8(header)?;

    let width = usize_after(&header, "|S")
        .ok_or_else(|| anyhow!("expected a `|S` record dtype in: {}", header.trim_end()))?;
    let rows = usize_after(&header, "'shape': (")
        .ok_or_else(|| anyhow!("malformed npy header: {}", header.trim_end()))?;

    let mut out = Vec::with_capacity(rows);
    let mut record = vec![0u8; width];
    for _ in 0..rows {
        reader.read_exact(&mut record)?;
        let end = record.iter().rposition(|&b| b != 0).map_or(0, |at| at + 1);
        out.push(record[..end].to_vec());
    }
    Ok(out)
}

/// Parses the decimal immediately following `key`.
fn usize_after(header: &str, key: &str) -> Option<usize> {
    let digits: String = header[header.find(key)? + key.len()..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(rows: Vec<Vec<u8>>) -> Vec<Vec<u8>> {
        let mut buf = Vec::new();
        write_bytes_npy(&mut buf, &rows).unwrap();
        read_bytes_npy(&mut buf.as_slice()).unwrap()
    }

    #[test]
    fn uneven_rows_round_trip() {
        let rows = vec![
            b"pick up the mug".to_vec(),
            b"".to_vec(),
            b"stack the bowls on the plate".to_vec(),
        ];
        assert_eq!(round_trip(rows.clone()), rows);
    }

    #[test]
    fn empty_array_round_trips() {
        assert!(round_trip(Vec::new()).is_empty());
    }

    #[test]
    fn preamble_is_64_byte_aligned() {
        let mut buf = Vec::new();
        write_bytes_npy(&mut buf, &[b"open the drawer".to_vec()]).unwrap();

        assert_eq!(&buf[..6], MAGIC);
        let header_len = u16::from_le_bytes([buf[8], buf[9]]) as usize;
        assert_eq!((10 + header_len) % 64, 0);
        assert_eq!(buf[10 + header_len - 1], b'\n');
    }
}
