//! 序列扫描：以 motif 长度为窗口宽度滑过序列，对每个窗口单独运行 motif DFA。

pub mod report;

use rayon::prelude::*;
use tracing::debug;

use crate::automata::{Alphabet, Dfa, Result};
use crate::motif::CompiledMotif;

pub use report::{histogram, HistogramBin, MotifScan, SequenceHits};

/// 带名字的序列，扫描的输入单位
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSequence {
    pub id: String,
    pub seq: Vec<u8>,
}

impl NamedSequence {
    pub fn new(id: impl Into<String>, seq: impl Into<Vec<u8>>) -> Self {
        Self { id: id.into(), seq: seq.into() }
    }
}

/// 扫描参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOpt {
    /// 1 = 顺序扫描；其它值在当前 rayon 线程池上按序列并行
    pub threads: usize,
}

impl Default for ScanOpt {
    fn default() -> Self {
        Self { threads: 1 }
    }
}

/// 长度为 `len` 的序列上宽度为 `width` 的窗口数
#[inline]
pub fn window_count(len: usize, width: usize) -> usize {
    if width == 0 || len < width {
        0
    } else {
        len - width + 1
    }
}

/// 对 `0..=len-width` 的每个偏移取窗口，从初始状态重新运行 `dfa`，
/// 返回被接受的偏移（升序，不去重）。
pub fn scan_windows(dfa: &Dfa, seq: &[u8], width: usize) -> Result<Vec<usize>> {
    if window_count(seq.len(), width) == 0 {
        return Ok(Vec::new());
    }
    let mut positions = Vec::new();
    for (offset, window) in seq.windows(width).enumerate() {
        if dfa.process(window)? {
            positions.push(offset);
        }
    }
    Ok(positions)
}

/// 扫描一批序列，每条序列独立产出结果，最后按输入顺序收集，不共享计数器。
fn scan_all(dfa: &Dfa, width: usize, threads: usize, items: Vec<(String, &[u8])>) -> Result<Vec<SequenceHits>> {
    let scan_one = |(id, seq): (String, &[u8])| -> Result<SequenceHits> {
        let positions = scan_windows(dfa, seq, width)?;
        Ok(SequenceHits { id, len: seq.len(), windows: window_count(seq.len(), width), positions })
    };
    if threads == 1 {
        items.into_iter().map(scan_one).collect()
    } else {
        items.into_par_iter().map(scan_one).collect()
    }
}

/// 持有最近一次编译的 motif DFA。
///
/// 缓存只有一个槽位：换用另一个 motif 时会重新编译并替换，
/// 同一个实例上不能同时保留多个 motif。
#[derive(Debug, Clone)]
pub struct SequenceProcessor {
    alphabet: Alphabet,
    opt: ScanOpt,
    motif_dfa: Option<CompiledMotif>,
}

impl Default for SequenceProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceProcessor {
    /// DNA 字母表，顺序扫描
    pub fn new() -> Self {
        Self::with_alphabet(Alphabet::dna())
    }

    pub fn with_alphabet(alphabet: Alphabet) -> Self {
        Self { alphabet, opt: ScanOpt::default(), motif_dfa: None }
    }

    pub fn with_opt(mut self, opt: ScanOpt) -> Self {
        self.opt = opt;
        self
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// 当前缓存的 motif
    pub fn compiled(&self) -> Option<&CompiledMotif> {
        self.motif_dfa.as_ref()
    }

    /// 无条件编译 `motif` 并替换缓存
    pub fn create_motif_dfa(&mut self, motif: &[u8]) -> Result<&Dfa> {
        let compiled = CompiledMotif::compile(motif, &self.alphabet)?;
        Ok(self.motif_dfa.insert(compiled).dfa())
    }

    /// 缓存命中则直接返回，否则编译新的 motif 替换旧的；编译失败时保留旧缓存
    fn ensure_motif(&mut self, motif: &[u8]) -> Result<&CompiledMotif> {
        let compiled = match self.motif_dfa.take() {
            Some(cached) if cached.motif() == motif => cached,
            previous => match CompiledMotif::compile(motif, &self.alphabet) {
                Ok(fresh) => {
                    if let Some(old) = previous {
                        debug!(
                            old = %String::from_utf8_lossy(old.motif()),
                            new = %String::from_utf8_lossy(motif),
                            "replacing cached motif DFA"
                        );
                    }
                    fresh
                }
                Err(e) => {
                    self.motif_dfa = previous;
                    return Err(e);
                }
            },
        };
        Ok(self.motif_dfa.insert(compiled))
    }

    /// 单条序列上所有命中的起点
    pub fn find_motif_positions(&mut self, sequence: &[u8], motif: &[u8]) -> Result<Vec<usize>> {
        let compiled = self.ensure_motif(motif)?;
        scan_windows(compiled.dfa(), sequence, compiled.len())
    }

    /// 匿名序列批量扫描，依次命名为 `sequence_0`, `sequence_1`, ...
    pub fn find_motifs_in_sequences<S>(&mut self, sequences: &[S], motif: &[u8]) -> Result<Vec<(String, Vec<usize>)>>
    where
        S: AsRef<[u8]> + Sync,
    {
        let scan = self.scan_anonymous(sequences, motif)?;
        Ok(scan.hits.into_iter().map(|h| (h.id, h.positions)).collect())
    }

    /// 全部序列的命中窗口 / 尝试窗口；没有窗口时为 0.0
    pub fn calculate_motif_frequency<S>(&mut self, sequences: &[S], motif: &[u8]) -> Result<f64>
    where
        S: AsRef<[u8]> + Sync,
    {
        Ok(self.scan_anonymous(sequences, motif)?.frequency())
    }

    /// 具名序列批量扫描，返回完整报告
    pub fn scan_batch(&mut self, sequences: &[NamedSequence], motif: &[u8]) -> Result<MotifScan> {
        let items = sequences.iter().map(|s| (s.id.clone(), s.seq.as_slice())).collect();
        self.scan_items(items, motif)
    }

    fn scan_anonymous<S>(&mut self, sequences: &[S], motif: &[u8]) -> Result<MotifScan>
    where
        S: AsRef<[u8]> + Sync,
    {
        let items = sequences
            .iter()
            .enumerate()
            .map(|(i, s)| (format!("sequence_{}", i), s.as_ref()))
            .collect();
        self.scan_items(items, motif)
    }

    fn scan_items(&mut self, items: Vec<(String, &[u8])>, motif: &[u8]) -> Result<MotifScan> {
        let threads = self.opt.threads;
        let compiled = self.ensure_motif(motif)?;
        let hits = scan_all(compiled.dfa(), compiled.len(), threads, items)?;
        let scan = MotifScan {
            motif: String::from_utf8_lossy(compiled.motif()).into_owned(),
            motif_len: compiled.len(),
            hits,
        };
        debug!(
            motif = %scan.motif,
            sequences = scan.hits.len(),
            windows = scan.total_windows(),
            matches = scan.total_matches(),
            "scanned batch"
        );
        Ok(scan)
    }
}
