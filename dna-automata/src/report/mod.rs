//! 结果输出。
//!
//! 扫描结果以三种形状交给 [`ReportSink`]：单条序列的位置列表、
//! 序列名 → 频率、序列名 → 位置列表。绘图或其它后端只需实现该 trait，
//! 不必接触自动机内部。

pub mod tsv;

use anyhow::Result;

use crate::scan::MotifScan;

pub use tsv::TsvSink;

pub trait ReportSink {
    /// 单条序列的命中位置（位置图）
    fn positions(&mut self, id: &str, positions: &[usize], seq_len: usize, motif_len: usize) -> Result<()>;

    /// 各序列的命中频率（对比柱状图）
    fn frequencies(&mut self, frequencies: &[(&str, f64)]) -> Result<()>;

    /// 各序列的命中位置（分布直方图）
    fn distribution(&mut self, positions: &[(&str, &[usize])]) -> Result<()>;

    /// 所有形状输出完毕后调用一次
    fn finish(&mut self, _scan: &MotifScan) -> Result<()> {
        Ok(())
    }
}

/// 把一次扫描按顺序交给 sink：逐条 `positions`，然后 `frequencies`、`distribution`、`finish`。
pub fn emit(scan: &MotifScan, sink: &mut dyn ReportSink) -> Result<()> {
    for hits in &scan.hits {
        sink.positions(&hits.id, &hits.positions, hits.len, scan.motif_len)?;
    }
    sink.frequencies(&scan.frequencies())?;
    sink.distribution(&scan.positions_by_sequence())?;
    sink.finish(scan)
}
