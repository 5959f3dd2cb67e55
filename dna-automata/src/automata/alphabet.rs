use std::collections::BTreeSet;

use crate::util::dna;

/// 有限字母表，单字节符号。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alphabet {
    symbols: BTreeSet<u8>,
}

impl Alphabet {
    pub fn new<I: IntoIterator<Item = u8>>(symbols: I) -> Self {
        Self { symbols: symbols.into_iter().collect() }
    }

    /// DNA 字母表 {A, C, G, T}
    pub fn dna() -> Self {
        Self::new(dna::DNA_BASES)
    }

    #[inline]
    pub fn contains(&self, symbol: u8) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn insert(&mut self, symbol: u8) -> bool {
        self.symbols.insert(symbol)
    }

    /// 按字节序升序遍历
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.symbols.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl FromIterator<u8> for Alphabet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self::new(iter)
    }
}
