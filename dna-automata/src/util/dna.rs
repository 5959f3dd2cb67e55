/// DNA 字母表，升序
pub const DNA_BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

#[inline]
pub fn is_base(b: u8) -> bool {
    matches!(b, b'A' | b'C' | b'G' | b'T')
}

/// 大写化；U 视为 T，其余非 ACGT 字符统一映射为 N。
/// N 不在 DNA 字母表中，因此包含 N 的窗口不会被任何 motif 接受。
pub fn normalize_seq(seq: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(seq.len());
    for &b in seq {
        let up = b.to_ascii_uppercase();
        let nb = match up {
            b'A' | b'C' | b'G' | b'T' | b'N' => up,
            b'U' => b'T',
            _ => b'N',
        };
        out.push(nb);
    }
    out
}

/// 归一化后非 ACGT 的碱基数
pub fn count_ambiguous(seq: &[u8]) -> usize {
    seq.iter().filter(|&&b| !is_base(b)).count()
}
