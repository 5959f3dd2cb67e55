use serde::Serialize;

/// 单条序列的扫描结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceHits {
    pub id: String,
    /// 序列长度
    pub len: usize,
    /// 尝试过的窗口数（`len < motif_len` 时为 0）
    pub windows: usize,
    /// 被接受的窗口起点，升序，重叠命中全部保留
    pub positions: Vec<usize>,
}

impl SequenceHits {
    /// 命中窗口 / 尝试窗口；没有窗口时为 0.0
    pub fn frequency(&self) -> f64 {
        ratio(self.positions.len(), self.windows)
    }

    /// 每个碱基是否被某个命中覆盖（0/1），即位置图的数据
    pub fn coverage(&self, motif_len: usize) -> Vec<u8> {
        let mut track = vec![0u8; self.len];
        for &p in &self.positions {
            let start = p.min(self.len);
            let end = (p + motif_len).min(self.len);
            track[start..end].fill(1);
        }
        track
    }
}

/// 一批序列针对同一个 motif 的扫描报告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotifScan {
    pub motif: String,
    pub motif_len: usize,
    /// 与输入顺序一致
    pub hits: Vec<SequenceHits>,
}

impl MotifScan {
    pub fn total_matches(&self) -> usize {
        self.hits.iter().map(|h| h.positions.len()).sum()
    }

    pub fn total_windows(&self) -> usize {
        self.hits.iter().map(|h| h.windows).sum()
    }

    /// 全部命中窗口 / 全部尝试窗口；没有窗口时为 0.0
    pub fn frequency(&self) -> f64 {
        ratio(self.total_matches(), self.total_windows())
    }

    pub fn get(&self, id: &str) -> Option<&SequenceHits> {
        self.hits.iter().find(|h| h.id == id)
    }

    /// 序列名 → 命中位置
    pub fn positions_by_sequence(&self) -> Vec<(&str, &[usize])> {
        self.hits.iter().map(|h| (h.id.as_str(), h.positions.as_slice())).collect()
    }

    /// 序列名 → 单序列频率
    pub fn frequencies(&self) -> Vec<(&str, f64)> {
        self.hits.iter().map(|h| (h.id.as_str(), h.frequency())).collect()
    }

    /// 所有序列的命中位置拼接在一起（分布直方图的输入）
    pub fn all_positions(&self) -> Vec<usize> {
        self.hits.iter().flat_map(|h| h.positions.iter().copied()).collect()
    }

    /// 指定序列的 0/1 覆盖轨迹（位置图的数据）；id 重复时取第一条，未知 id 返回 `None`
    pub fn coverage_track(&self, id: &str) -> Option<Vec<u8>> {
        self.get(id).map(|h| h.coverage(self.motif_len))
    }
}

/// 直方图的一个桶，区间 `[lo, hi)`，最后一个桶包含右端点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// 等宽分桶，范围取 `[min, max]`。
/// 所有值相同时范围扩展为 `[v - 0.5, v + 0.5]`。
pub fn histogram(values: &[usize], bins: usize) -> Vec<HistogramBin> {
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }

    let (lo, hi) = if min == max {
        (min as f64 - 0.5, max as f64 + 0.5)
    } else {
        (min as f64, max as f64)
    };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = ((v as f64 - lo) / width) as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lo: lo + width * i as f64,
            hi: lo + width * (i + 1) as f64,
            count,
        })
        .collect()
}

#[inline]
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(id: &str, len: usize, windows: usize, positions: &[usize]) -> SequenceHits {
        SequenceHits { id: id.to_string(), len, windows, positions: positions.to_vec() }
    }

    #[test]
    fn frequency_guards_zero_windows() {
        assert_eq!(hits("s", 2, 0, &[]).frequency(), 0.0);
        let scan = MotifScan { motif: "ATG".into(), motif_len: 3, hits: vec![hits("s", 2, 0, &[])] };
        assert_eq!(scan.frequency(), 0.0);
        let empty = MotifScan { motif: "ATG".into(), motif_len: 3, hits: Vec::new() };
        assert_eq!(empty.frequency(), 0.0);
    }

    #[test]
    fn aggregates() {
        let scan = MotifScan {
            motif: "AT".into(),
            motif_len: 2,
            hits: vec![hits("a", 5, 4, &[0, 3]), hits("b", 3, 2, &[1]), hits("c", 1, 0, &[])],
        };
        assert_eq!(scan.total_matches(), 3);
        assert_eq!(scan.total_windows(), 6);
        assert!((scan.frequency() - 0.5).abs() < 1e-12);
        assert_eq!(scan.all_positions(), vec![0, 3, 1]);
        assert_eq!(scan.positions_by_sequence()[1], ("b", &[1usize][..]));
        let freqs = scan.frequencies();
        assert_eq!(freqs[0], ("a", 0.5));
        assert_eq!(freqs[2], ("c", 0.0));
        assert_eq!(scan.get("b").map(|h| h.len), Some(3));
        assert!(scan.get("z").is_none());
    }

    #[test]
    fn coverage_track_marks_motif_span() {
        let h = hits("s", 7, 5, &[1, 4]);
        assert_eq!(h.coverage(3), vec![0, 1, 1, 1, 1, 1, 1]);
        let h = hits("s", 6, 5, &[0]);
        assert_eq!(h.coverage(2), vec![1, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn coverage_track_by_id() {
        let scan = MotifScan {
            motif: "ATG".into(),
            motif_len: 3,
            hits: vec![hits("a", 7, 5, &[1, 4]), hits("b", 2, 0, &[])],
        };
        assert_eq!(scan.coverage_track("a"), Some(vec![0, 1, 1, 1, 1, 1, 1]));
        assert_eq!(scan.coverage_track("b"), Some(vec![0, 0]));
        assert_eq!(scan.coverage_track("missing"), None);
    }

    #[test]
    fn coverage_ignores_positions_past_the_end() {
        // 手工构造的越界位置不会越界写入
        let h = hits("s", 4, 2, &[2, 9]);
        assert_eq!(h.coverage(3), vec![0, 0, 1, 1]);
    }

    #[test]
    fn histogram_bins() {
        let bins = histogram(&[0, 1, 2, 3, 4, 10], 5);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![2, 2, 1, 0, 1]);
        assert_eq!(bins[0].lo, 0.0);
        assert_eq!(bins[4].hi, 10.0);
    }

    #[test]
    fn histogram_degenerate_inputs() {
        assert!(histogram(&[], 10).is_empty());
        assert!(histogram(&[3], 0).is_empty());
        let single = histogram(&[7, 7], 2);
        assert_eq!(single.iter().map(|b| b.count).sum::<usize>(), 2);
        assert_eq!(single[0].lo, 6.5);
    }
}
