//! # dna-automata
//!
//! 用显式有限自动机在 DNA 序列中搜索固定 motif，并统计出现频率。
//!
//! - **自动机**：值语义状态、稀疏转移表 DFA、first-match 策略的下推自动机（PDA）
//! - **Motif 编译**：把字面 motif 编译成 L+1 个状态的 DFA（失配回到 q0）
//! - **序列扫描**：宽度为 motif 长度的滑动窗口，逐窗口运行 DFA，可按序列并行
//! - **结果输出**：位置列表 / 频率 / 位置分布三种形状，交给任意 [`report::ReportSink`]
//!
//! ## 快速示例
//!
//! ```rust
//! use dna_automata::scan::SequenceProcessor;
//!
//! let mut processor = SequenceProcessor::new();
//! let positions = processor.find_motif_positions(b"CATGATG", b"ATG").unwrap();
//! assert_eq!(positions, vec![1, 4]);
//!
//! let freq = processor.calculate_motif_frequency(&[b"CATGATG"], b"ATG").unwrap();
//! assert!((freq - 0.4).abs() < 1e-12);
//! ```
//!
//! ## 模块说明
//!
//! - [`automata`] — State / Alphabet / DFA / PDA 与错误类型
//! - [`motif`] — motif → DFA 编译器
//! - [`scan`] — 滑动窗口扫描、批量统计与报告结构
//! - [`io`] — FASTA 序列读取
//! - [`report`] — 结果输出 trait 与 TSV/JSON 实现
//! - [`util`] — DNA 归一化工具函数

pub mod automata;
pub mod io;
pub mod motif;
pub mod report;
pub mod scan;
pub mod util;
