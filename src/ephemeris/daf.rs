//! Double-precision Array File (DAF) container reader.
//!
//! A DAF is a sequence of 1024-byte records. Record 1 is the file record;
//! summary records form a doubly-linked list starting at `FWARD`, each followed
//! by a name record. Array addresses are 1-based indices of 8-byte words.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Size of one DAF record in bytes.
pub const RECORD_BYTES: usize = 1024;

const WORD_BYTES: usize = 8;
const LOCFMT_RANGE: std::ops::Range<usize> = 88..96;

#[derive(thiserror::Error, Debug)]
pub enum DafError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a DAF file (id word {0:?})")]
    BadIdWord(String),

    #[error("unsupported binary format {0:?}")]
    UnsupportedFormat(String),

    #[error("file truncated: needed {needed} bytes at offset {offset}, have {len}")]
    Truncated {
        offset: usize,
        needed: usize,
        len: usize,
    },

    #[error("invalid summary layout (ND={nd}, NI={ni})")]
    BadLayout { nd: i32, ni: i32 },

    #[error("summary record chain is cyclic or corrupt at record {0}")]
    BadRecordChain(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    fn from_locfmt(fmt: &str) -> Result<Self, DafError> {
        match fmt.trim_matches(|c: char| c == '\0' || c.is_whitespace()) {
            "LTL-IEEE" | "" => Ok(Endian::Little),
            "BIG-IEEE" => Ok(Endian::Big),
            other => Err(DafError::UnsupportedFormat(other.to_string())),
        }
    }

    /// LOCFMT string written into the file record.
    pub fn locfmt(&self) -> &'static [u8; 8] {
        match self {
            Endian::Little => b"LTL-IEEE",
            Endian::Big => b"BIG-IEEE",
        }
    }
}

/// One array descriptor: `ND` doubles, `NI` integers and the array name.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub name: String,
    pub doubles: Vec<f64>,
    pub ints: Vec<i32>,
}

/// A fully loaded DAF file.
#[derive(Debug)]
pub struct Daf {
    bytes: Vec<u8>,
    endian: Endian,
    id_word: String,
    internal_name: String,
    nd: usize,
    ni: usize,
    summaries: Vec<Summary>,
}

impl Daf {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DafError> {
        let mut f = File::open(path)?;
        let mut buf = Vec::new();
        f.read_to_end(&mut buf)?;
        Self::from_bytes(buf)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, DafError> {
        let file_record = Reader::new(&bytes, Endian::Little).slice(0, RECORD_BYTES)?;

        let id_word = ascii(&file_record[0..8]);
        if !id_word.starts_with("DAF/") && id_word != "NAIF/DAF" {
            return Err(DafError::BadIdWord(id_word));
        }

        let endian = Endian::from_locfmt(&ascii(&file_record[LOCFMT_RANGE]))?;
        let r = Reader::new(&bytes, endian);

        let nd_raw = r.i32_at(8)?;
        let ni_raw = r.i32_at(12)?;
        if !(0..=124).contains(&nd_raw) || !(2..=250).contains(&ni_raw) {
            return Err(DafError::BadLayout {
                nd: nd_raw,
                ni: ni_raw,
            });
        }
        let (nd, ni) = (nd_raw as usize, ni_raw as usize);
        let internal_name = ascii(&file_record[16..76]);
        let fward = r.i32_at(76)?;

        let summary_words = nd + ni.div_ceil(2);
        let name_bytes = summary_words * WORD_BYTES;
        let record_count = bytes.len() / RECORD_BYTES;
        let max_summaries = (RECORD_BYTES / WORD_BYTES - 3) / summary_words;

        let mut summaries = Vec::new();
        let mut record = fward.max(0) as usize;
        let mut visited = 0usize;
        while record != 0 {
            visited += 1;
            if visited > record_count || record > record_count {
                return Err(DafError::BadRecordChain(record));
            }

            let base = (record - 1) * RECORD_BYTES;
            let next = r.f64_at(base)?;
            // Word 2 is the backward pointer, unused when walking forward
            let count = r.f64_at(base + 2 * WORD_BYTES)?;
            if !(0.0..=max_summaries as f64).contains(&count) || count.fract() != 0.0 {
                return Err(DafError::BadRecordChain(record));
            }
            let count = count as usize;

            for i in 0..count {
                let offset = base + 3 * WORD_BYTES + i * summary_words * WORD_BYTES;
                let doubles = (0..nd)
                    .map(|k| r.f64_at(offset + k * WORD_BYTES))
                    .collect::<Result<Vec<_>, _>>()?;
                let ints_offset = offset + nd * WORD_BYTES;
                let ints = (0..ni)
                    .map(|k| r.i32_at(ints_offset + k * 4))
                    .collect::<Result<Vec<_>, _>>()?;

                let name_offset = base + RECORD_BYTES + i * name_bytes;
                let name = r
                    .slice(name_offset, name_bytes)
                    .map(ascii)
                    .unwrap_or_default();

                summaries.push(Summary {
                    name,
                    doubles,
                    ints,
                });
            }

            if !(0.0..=record_count as f64).contains(&next) || next.fract() != 0.0 {
                return Err(DafError::BadRecordChain(record));
            }
            record = next as usize;
        }

        Ok(Self {
            bytes,
            endian,
            id_word,
            internal_name,
            nd,
            ni,
            summaries,
        })
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// File type word, e.g. `DAF/SPK`.
    pub fn id_word(&self) -> &str {
        &self.id_word
    }

    pub fn internal_name(&self) -> &str {
        &self.internal_name
    }

    /// Number of double components per summary.
    pub fn nd(&self) -> usize {
        self.nd
    }

    /// Number of integer components per summary.
    pub fn ni(&self) -> usize {
        self.ni
    }

    pub fn summaries(&self) -> &[Summary] {
        &self.summaries
    }

    /// Read the doubles stored at word addresses `start..=end` (1-based).
    pub fn read_words(&self, start: usize, end: usize) -> Result<Vec<f64>, DafError> {
        if start == 0 || end < start {
            return Ok(Vec::new());
        }
        if end > self.bytes.len() / WORD_BYTES {
            return Err(DafError::Truncated {
                offset: (start - 1).saturating_mul(WORD_BYTES),
                needed: (end - start + 1).saturating_mul(WORD_BYTES),
                len: self.bytes.len(),
            });
        }
        let r = Reader::new(&self.bytes, self.endian);
        (start..=end)
            .map(|addr| r.f64_at((addr - 1) * WORD_BYTES))
            .collect()
    }
}

fn ascii(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}

/// Bounds-checked random-access reader over the raw file bytes.
struct Reader<'a> {
    bytes: &'a [u8],
    endian: Endian,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8], endian: Endian) -> Self {
        Self { bytes, endian }
    }

    fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], DafError> {
        offset
            .checked_add(len)
            .and_then(|end| self.bytes.get(offset..end))
            .ok_or(DafError::Truncated {
                offset,
                needed: len,
                len: self.bytes.len(),
            })
    }

    fn i32_at(&self, offset: usize) -> Result<i32, DafError> {
        let mut b = [0u8; 4];
        b.copy_from_slice(self.slice(offset, 4)?);
        Ok(match self.endian {
            Endian::Little => i32::from_le_bytes(b),
            Endian::Big => i32::from_be_bytes(b),
        })
    }

    fn f64_at(&self, offset: usize) -> Result<f64, DafError> {
        let mut b = [0u8; 8];
        b.copy_from_slice(self.slice(offset, 8)?);
        Ok(match self.endian {
            Endian::Little => f64::from_le_bytes(b),
            Endian::Big => f64::from_be_bytes(b),
        })
    }
}
