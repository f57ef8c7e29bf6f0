/// Packs bits into bytes, most significant bit first.
///
/// Only the lowest bit of every value is taken into account. A trailing group
/// of fewer than eight bits is dropped rather than padded, so the output is
/// always `floor(len / 8)` bytes long; the device firmware expects exactly
/// that many.
pub fn pack<T>(bits: impl IntoIterator<Item = T>) -> Vec<u8>
where
    T: Into<u8>,
{
    let mut out = Vec::new();
    let mut byte = 0u8;
    let mut len = 0;

    for bit in bits {
        byte = (byte << 1) | (bit.into() & 1);
        len += 1;

        if len == 8 {
            out.push(byte);
            byte = 0;
            len = 0;
        }
    }

    out
}

/// Reads `len` bits back out of `bytes`; bits past the end of `bytes` (i.e.
/// those dropped by [`pack`]) come out as `false`.
pub fn unpack(bytes: &[u8], len: usize) -> impl Iterator<Item = bool> + '_ {
    (0..len).map(move |idx| {
        bytes
            .get(idx / 8)
            .map_or(false, |byte| byte & (0x80 >> (idx % 8)) != 0)
    })
}

/// Number of bytes [`pack`] produces for `bits` bits.
pub fn packed_len(bits: usize) -> usize {
    bits / 8
}
