//! Variable-length integer codec for code streams.
//!
//! Values below 128 occupy a single byte. Larger values are split into
//! base-128 groups and written most-significant group first; the
//! continuation bit (0x80) is set on every byte except the first. A varint
//! therefore always *starts* with a clear high bit and *continues* with set
//! high bits, which makes the encoding self-delimiting.
//!
//! Signed values are zig-zag mapped onto unsigned ones first
//! (`0, -1, 1, -2, …` → `0, 1, 2, 3, …`), so small magnitudes of either
//! sign stay short.

/// Varint decode failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VarintError {
    /// Input ended in the middle of a varint.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// The first byte of a varint had its continuation bit set.
    #[error("varint starts with a continuation byte")]
    Malformed,
    /// The encoded value does not fit in 64 bits.
    #[error("varint overflows u64")]
    Overflow,
}

/// Appends the unsigned varint encoding of `value` to `out`.
pub fn write_uint(out: &mut Vec<u8>, mut value: u64) {
    if value < 0x80 {
        out.push(value as u8);
        return;
    }

    // 64 bits split into 7-bit groups is at most 10 groups.
    let mut groups = [0u8; 10];
    let mut count = 0;
    loop {
        let index = count;
        count += 1;
        groups[index] = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            break;
        }
        groups[index] |= 0x80;
    }

    // Most-significant group first; it is the only byte without the
    // continuation bit.
    for index in (0..count).rev() {
        out.push(groups[index]);
    }
}

/// Appends the zig-zag signed varint encoding of `value` to `out`.
pub fn write_sint(out: &mut Vec<u8>, value: i64) {
    let unsigned = if value < 0 {
        (!(value as u64) << 1) | 1
    } else {
        (value as u64) << 1
    };
    write_uint(out, unsigned);
}

/// Decodes an unsigned varint starting at `bytes[*pos]`, advancing `pos`
/// past it.
pub fn read_uint(bytes: &[u8], pos: &mut usize) -> Result<u64, VarintError> {
    let first = *bytes.get(*pos).ok_or(VarintError::UnexpectedEof)?;
    if first & 0x80 != 0 {
        return Err(VarintError::Malformed);
    }
    *pos += 1;

    let mut value = u64::from(first);
    while let Some(&byte) = bytes.get(*pos) {
        if byte & 0x80 == 0 {
            break;
        }
        if value >> 57 != 0 {
            return Err(VarintError::Overflow);
        }
        value = (value << 7) | u64::from(byte & 0x7f);
        *pos += 1;
    }
    Ok(value)
}

/// Decodes a zig-zag signed varint starting at `bytes[*pos]`.
pub fn read_sint(bytes: &[u8], pos: &mut usize) -> Result<i64, VarintError> {
    let unsigned = read_uint(bytes, pos)?;
    let value = if unsigned & 1 != 0 {
        !(unsigned >> 1) as i64
    } else {
        (unsigned >> 1) as i64
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uint_bytes(value: u64) -> Vec<u8> {
        let mut out = Vec::new();
        write_uint(&mut out, value);
        out
    }

    fn sint_bytes(value: i64) -> Vec<u8> {
        let mut out = Vec::new();
        write_sint(&mut out, value);
        out
    }

    #[test]
    fn small_values_are_one_byte() {
        assert_eq!(uint_bytes(0), [0x00]);
        assert_eq!(uint_bytes(1), [0x01]);
        assert_eq!(uint_bytes(127), [0x7f]);
    }

    #[test]
    fn group_order_is_big_endian() {
        // 128 = group 1 followed by group 0; only the trailing byte carries
        // the continuation bit.
        assert_eq!(uint_bytes(128), [0x01, 0x80]);
        assert_eq!(uint_bytes(300), [0x02, 0xac]);
        assert_eq!(uint_bytes(16384), [0x01, 0x80, 0x80]);
    }

    #[test]
    fn uint_roundtrip() {
        let samples = [
            0u64,
            1,
            127,
            128,
            129,
            255,
            300,
            16383,
            16384,
            u64::from(u32::MAX),
            u64::MAX - 1,
            u64::MAX,
        ];
        for &value in &samples {
            let bytes = uint_bytes(value);
            let mut pos = 0;
            assert_eq!(read_uint(&bytes, &mut pos), Ok(value));
            assert_eq!(pos, bytes.len());
        }
    }

    #[test]
    fn sint_zigzag_mapping() {
        assert_eq!(sint_bytes(0), [0x00]);
        assert_eq!(sint_bytes(-1), [0x01]);
        assert_eq!(sint_bytes(1), [0x02]);
        assert_eq!(sint_bytes(-2), [0x03]);
        assert_eq!(sint_bytes(2), [0x04]);
    }

    #[test]
    fn sint_roundtrip() {
        let samples = [0i64, 1, -1, 63, -64, 64, -65, i64::MAX, i64::MIN];
        for &value in &samples {
            let bytes = sint_bytes(value);
            let mut pos = 0;
            assert_eq!(read_sint(&bytes, &mut pos), Ok(value));
            assert_eq!(pos, bytes.len());
        }
    }

    #[test]
    fn varints_are_self_delimiting() {
        let mut out = Vec::new();
        write_uint(&mut out, 5);
        write_uint(&mut out, 300);
        write_sint(&mut out, -7);
        write_uint(&mut out, u64::MAX);

        let mut pos = 0;
        assert_eq!(read_uint(&out, &mut pos), Ok(5));
        assert_eq!(read_uint(&out, &mut pos), Ok(300));
        assert_eq!(read_sint(&out, &mut pos), Ok(-7));
        assert_eq!(read_uint(&out, &mut pos), Ok(u64::MAX));
        assert_eq!(pos, out.len());
    }

    #[test]
    fn truncated_input_is_rejected() {
        let mut pos = 0;
        assert_eq!(read_uint(&[], &mut pos), Err(VarintError::UnexpectedEof));
    }

    #[test]
    fn continuation_start_is_rejected() {
        let mut pos = 0;
        assert_eq!(
            read_uint(&[0x80, 0x01], &mut pos),
            Err(VarintError::Malformed)
        );
    }

    #[test]
    fn overlong_input_is_rejected() {
        // A leading group followed by ten continuation bytes encodes more
        // than 64 bits.
        let mut bytes = vec![0x7f];
        bytes.extend(std::iter::repeat_n(0xff, 10));
        let mut pos = 0;
        assert_eq!(read_uint(&bytes, &mut pos), Err(VarintError::Overflow));
    }
}
