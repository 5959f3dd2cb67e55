use anyhow::{bail, Context, Result};
use std::io::BufRead;
use std::path::Path;

use tracing::{debug, warn};

use crate::scan::NamedSequence;
use crate::util::dna;

#[derive(Debug, Clone)]
pub struct FastaRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: Vec<u8>,
}

impl From<FastaRecord> for NamedSequence {
    fn from(rec: FastaRecord) -> Self {
        NamedSequence { id: rec.id, seq: rec.seq }
    }
}

/// 流式 FASTA 读取器：容忍 CRLF、行内空白与文件开头的空行，序列统一大写。
pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
    peek_header: Option<String>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            done: false,
            peek_header: None,
        }
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.done {
            return Ok(None);
        }

        let header = match self.peek_header.take() {
            Some(h) => h,
            None => match self.skip_to_header()? {
                Some(h) => h,
                None => return Ok(None),
            },
        };

        let (id, desc) = split_header(&header);

        let mut seq: Vec<u8> = Vec::new();
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                self.done = true;
                break;
            }
            if let Some(h) = self.buf.strip_prefix('>') {
                self.peek_header = Some(h.trim().to_string());
                break;
            }
            seq.extend(
                self.buf
                    .bytes()
                    .filter(|b| !b.is_ascii_whitespace())
                    .map(|b| b.to_ascii_uppercase()),
            );
        }

        Ok(Some(FastaRecord { id, desc, seq }))
    }

    /// 跳过第一个 '>' 之前的内容
    fn skip_to_header(&mut self) -> Result<Option<String>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                self.done = true;
                return Ok(None);
            }
            if let Some(h) = self.buf.strip_prefix('>') {
                return Ok(Some(h.trim().to_string()));
            }
        }
    }
}

fn split_header(header: &str) -> (String, Option<String>) {
    let mut parts = header.splitn(2, char::is_whitespace);
    let id = parts.next().unwrap_or("").to_string();
    let desc = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    (id, desc)
}

/// 读取全部记录并归一化为 DNA（U→T，其它非 ACGT → N）。
/// 空 id 的记录按出现顺序命名为 `sequence_{i}`。
pub fn read_sequences<R: BufRead>(reader: R) -> Result<Vec<NamedSequence>> {
    let mut reader = FastaReader::new(reader);
    let mut out = Vec::new();
    while let Some(mut rec) = reader.next_record()? {
        if rec.id.is_empty() {
            rec.id = format!("sequence_{}", out.len());
        }
        rec.seq = dna::normalize_seq(&rec.seq);
        let ambiguous = dna::count_ambiguous(&rec.seq);
        if ambiguous > 0 {
            warn!(id = %rec.id, ambiguous, "sequence contains non-ACGT bases; windows covering them never match");
        }
        out.push(NamedSequence::from(rec));
    }
    Ok(out)
}

/// 从 FASTA 文件加载序列；文件中没有任何记录时报错。
pub fn load_sequences<P: AsRef<Path>>(path: P) -> Result<Vec<NamedSequence>> {
    let path = path.as_ref();
    let fh = std::fs::File::open(path)
        .with_context(|| format!("cannot open FASTA '{}'", path.display()))?;
    let seqs = read_sequences(std::io::BufReader::new(fh))
        .with_context(|| format!("cannot read FASTA '{}'", path.display()))?;
    if seqs.is_empty() {
        bail!("FASTA file '{}' contains no sequences", path.display());
    }
    debug!(path = %path.display(), sequences = seqs.len(), "loaded FASTA");
    Ok(seqs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_simple_fasta() {
        let data = b">chr1 first\nACgTNN\n>chr2\nAAA\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));

        let r1 = r.next_record().unwrap().unwrap();
        assert_eq!(r1.id, "chr1");
        assert_eq!(r1.desc.as_deref(), Some("first"));
        assert_eq!(r1.seq, b"ACGTNN");

        let r2 = r.next_record().unwrap().unwrap();
        assert_eq!(r2.id, "chr2");
        assert_eq!(r2.desc, None);
        assert_eq!(r2.seq, b"AAA");

        assert!(r.next_record().unwrap().is_none());
        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn parse_fasta_with_crlf_and_leading_lines() {
        let data = b"\n;comment\n>chr1 desc\r\nAC g t n\r\n acgt\r\n>chr2 \r\n N N N \r\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));

        let r1 = r.next_record().unwrap().unwrap();
        assert_eq!(r1.id, "chr1");
        assert_eq!(r1.desc.as_deref(), Some("desc"));
        assert_eq!(r1.seq, b"ACGTNACGT");

        let r2 = r.next_record().unwrap().unwrap();
        assert_eq!(r2.id, "chr2");
        assert_eq!(r2.seq, b"NNN");
        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn read_sequences_normalizes_and_names() {
        let data = b">\nacgu\n>s2\nAXG\n";
        let seqs = read_sequences(Cursor::new(&data[..])).unwrap();
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0], NamedSequence::new("sequence_0", b"ACGT".to_vec()));
        assert_eq!(seqs[1].seq, b"ANG");
    }

    #[test]
    fn load_missing_file_fails() {
        let err = load_sequences("/nonexistent/definitely/missing.fa").unwrap_err();
        assert!(err.to_string().contains("cannot open FASTA"));
    }
}
