//! Motif 编译器：把字面 motif 编译成识别它的 DFA。
//!
//! 对长度为 L 的 motif 建立 `q0..qL` 共 L+1 个状态，`qL` 为终态。
//! 在 `qi` 读到 `motif[i]` 前进到 `q(i+1)`，读到字母表中的其它符号一律回到 `q0`。
//! 这是朴素的重置策略（没有 KMP 失配链接），只在输入长度恰好为 L 的窗口上
//! 与字面比较等价，因此扫描器对每个偏移单独运行一次，而不是流式扫描整条序列。

use tracing::debug;

use crate::automata::{Alphabet, AutomatonError, Dfa, Result, State};

/// 编译 motif。motif 中的字母表外符号会以 `InvalidSymbol` 报错。
pub fn compile_motif(motif: &[u8], alphabet: &Alphabet) -> Result<Dfa> {
    if motif.is_empty() {
        return Err(AutomatonError::EmptyMotif);
    }

    let len = motif.len();
    let mut dfa = Dfa::new(alphabet.clone());

    let states: Vec<State> = (0..=len).map(|i| State::new(format!("q{}", i), i == len)).collect();
    for st in &states {
        dfa.add_state(st.clone());
    }
    dfa.set_initial_state(&states[0])?;

    for (i, &expected) in motif.iter().enumerate() {
        dfa.add_transition(&states[i], expected, &states[i + 1])?;
        for other in alphabet.iter().filter(|&sym| sym != expected) {
            dfa.add_transition(&states[i], other, &states[0])?;
        }
    }

    debug!(
        motif = %String::from_utf8_lossy(motif),
        states = dfa.states().len(),
        transitions = dfa.transition_count(),
        "compiled motif DFA"
    );
    Ok(dfa)
}

/// 编译好的 motif 及其 DFA
#[derive(Debug, Clone)]
pub struct CompiledMotif {
    motif: Vec<u8>,
    dfa: Dfa,
}

impl CompiledMotif {
    pub fn compile(motif: &[u8], alphabet: &Alphabet) -> Result<Self> {
        let dfa = compile_motif(motif, alphabet)?;
        Ok(Self { motif: motif.to_vec(), dfa })
    }

    pub fn motif(&self) -> &[u8] {
        &self.motif
    }

    /// motif 长度，也就是扫描窗口宽度
    pub fn len(&self) -> usize {
        self.motif.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motif.is_empty()
    }

    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_windows(len: usize) -> Vec<Vec<u8>> {
        let mut out = vec![Vec::new()];
        for _ in 0..len {
            out = out
                .into_iter()
                .flat_map(|w| {
                    b"ACGT".iter().map(move |&b| {
                        let mut n = w.clone();
                        n.push(b);
                        n
                    })
                })
                .collect();
        }
        out
    }

    #[test]
    fn structure() {
        let dfa = compile_motif(b"ATG", &Alphabet::dna()).unwrap();
        assert_eq!(dfa.states().len(), 4);
        assert_eq!(dfa.final_states().len(), 1);
        assert!(dfa.final_states().contains(&State::accepting("q3")));
        assert_eq!(dfa.initial_state(), Some(&State::plain("q0")));
        // 每个非终态对 4 个碱基都有转移；终态没有出边
        assert_eq!(dfa.transition_count(), 3 * 4);
        assert_eq!(dfa.transition(&State::plain("q1"), b'C'), Some(&State::plain("q0")));
        assert_eq!(dfa.transition(&State::accepting("q3"), b'A'), None);
    }

    #[test]
    fn accepts_exactly_the_motif_on_equal_length_windows() {
        for motif in [&b"ATG"[..], b"AAA", b"GCGC"] {
            let dfa = compile_motif(motif, &Alphabet::dna()).unwrap();
            for w in all_windows(motif.len()) {
                assert_eq!(dfa.process(&w).unwrap(), w == motif, "motif={:?} window={:?}", motif, w);
            }
        }
    }

    #[test]
    fn window_with_non_alphabet_base_rejects() {
        let dfa = compile_motif(b"ACG", &Alphabet::dna()).unwrap();
        assert!(!dfa.process(b"ANG").unwrap());
    }

    #[test]
    fn rejects_motif_outside_alphabet() {
        assert_eq!(
            compile_motif(b"ATN", &Alphabet::dna()).unwrap_err(),
            AutomatonError::InvalidSymbol(b'N')
        );
        assert_eq!(
            compile_motif(b"atg", &Alphabet::dna()).unwrap_err(),
            AutomatonError::InvalidSymbol(b'a')
        );
    }

    #[test]
    fn rejects_empty_motif() {
        assert_eq!(compile_motif(b"", &Alphabet::dna()).unwrap_err(), AutomatonError::EmptyMotif);
    }

    #[test]
    fn custom_alphabet() {
        let rna = Alphabet::new(*b"ACGU");
        let m = CompiledMotif::compile(b"AUG", &rna).unwrap();
        assert_eq!(m.len(), 3);
        assert!(m.dfa().process(b"AUG").unwrap());
        assert!(!m.dfa().process(b"ATG").unwrap());
    }
}
