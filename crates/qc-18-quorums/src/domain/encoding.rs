//! # Canonical Encoding
//!
//! Byte encodings that feed hashed messages. Changing any of them changes
//! every commitment and sign hash on the network.

/// Append a compact-size length prefix.
///
/// | Value | Encoding |
/// |-------|----------|
/// | `< 0xFD` | 1 byte |
/// | `<= 0xFFFF` | `0xFD` + u16 LE |
/// | `<= 0xFFFF_FFFF` | `0xFE` + u32 LE |
/// | otherwise | `0xFF` + u64 LE |
pub fn write_compact_size(out: &mut Vec<u8>, value: u64) {
    if value < 0xFD {
        out.push(value as u8);
    } else if value <= 0xFFFF {
        out.push(0xFD);
        out.extend_from_slice(&(value as u16).to_le_bytes());
    } else if value <= 0xFFFF_FFFF {
        out.push(0xFE);
        out.extend_from_slice(&(value as u32).to_le_bytes());
    } else {
        out.push(0xFF);
        out.extend_from_slice(&value.to_le_bytes());
    }
}

/// Append a length-prefixed byte string.
pub fn write_var_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    write_compact_size(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}
