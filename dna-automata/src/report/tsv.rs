use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::ReportSink;
use crate::scan::{histogram, MotifScan};

pub const POSITIONS_FILE: &str = "motif_positions.tsv";
pub const FREQUENCIES_FILE: &str = "motif_frequencies.tsv";
pub const DISTRIBUTION_FILE: &str = "motif_distribution.tsv";
pub const SUMMARY_FILE: &str = "summary.json";

/// 把三种结果形状写成 TSV，另外写一份 JSON 摘要。
pub struct TsvSink {
    dir: PathBuf,
    bins: usize,
    positions: BufWriter<File>,
}

#[derive(Serialize)]
struct Summary<'a> {
    motif: &'a str,
    sequences: usize,
    total_windows: usize,
    total_matches: usize,
    frequency: f64,
    coverage: Vec<SequenceCoverage<'a>>,
    generated_at: String,
}

/// 被至少一个命中覆盖的碱基数
#[derive(Serialize)]
struct SequenceCoverage<'a> {
    id: &'a str,
    covered_bases: usize,
}

impl TsvSink {
    /// 在 `dir` 下输出，目录不存在时创建。`bins` 为分布直方图的桶数。
    pub fn create<P: AsRef<Path>>(dir: P, bins: usize) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("cannot create output directory '{}'", dir.display()))?;
        let mut positions = BufWriter::new(create_file(&dir, POSITIONS_FILE)?);
        writeln!(positions, "sequence\tlength\tmotif_len\tcount\tpositions")?;
        Ok(Self { dir, bins, positions })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn create_file(dir: &Path, name: &str) -> Result<File> {
    let path = dir.join(name);
    File::create(&path).with_context(|| format!("cannot write '{}'", path.display()))
}

impl ReportSink for TsvSink {
    fn positions(&mut self, id: &str, positions: &[usize], seq_len: usize, motif_len: usize) -> Result<()> {
        let joined = positions
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(",");
        writeln!(self.positions, "{}\t{}\t{}\t{}\t{}", id, seq_len, motif_len, positions.len(), joined)?;
        Ok(())
    }

    fn frequencies(&mut self, frequencies: &[(&str, f64)]) -> Result<()> {
        let mut out = BufWriter::new(create_file(&self.dir, FREQUENCIES_FILE)?);
        writeln!(out, "sequence\tfrequency")?;
        for (id, freq) in frequencies {
            writeln!(out, "{}\t{:.6}", id, freq)?;
        }
        out.flush()?;
        Ok(())
    }

    fn distribution(&mut self, positions: &[(&str, &[usize])]) -> Result<()> {
        let all: Vec<usize> = positions.iter().flat_map(|(_, p)| p.iter().copied()).collect();
        let mut out = BufWriter::new(create_file(&self.dir, DISTRIBUTION_FILE)?);
        writeln!(out, "bin_start\tbin_end\tcount")?;
        for bin in histogram(&all, self.bins) {
            writeln!(out, "{:.2}\t{:.2}\t{}", bin.lo, bin.hi, bin.count)?;
        }
        out.flush()?;
        Ok(())
    }

    fn finish(&mut self, scan: &MotifScan) -> Result<()> {
        self.positions.flush()?;
        let coverage = scan
            .hits
            .iter()
            .map(|h| SequenceCoverage {
                id: &h.id,
                covered_bases: scan
                    .coverage_track(&h.id)
                    .map_or(0, |track| track.iter().filter(|&&b| b == 1).count()),
            })
            .collect();
        let summary = Summary {
            motif: &scan.motif,
            sequences: scan.hits.len(),
            total_windows: scan.total_windows(),
            total_matches: scan.total_matches(),
            frequency: scan.frequency(),
            coverage,
            generated_at: chrono::Utc::now().to_rfc3339(),
        };
        let mut out = BufWriter::new(create_file(&self.dir, SUMMARY_FILE)?);
        serde_json::to_writer_pretty(&mut out, &summary)?;
        out.flush()?;
        Ok(())
    }
}
