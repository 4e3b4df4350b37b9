//! Test utilities for ephemeris and pipeline tests.
//!
//! Provides an in-memory SPK kernel writer so the DAF reader and the
//! Chebyshev evaluator can be exercised without shipping real kernels.

/// Synthetic SPK kernels.
pub mod spk {
    use crate::ephemeris::daf::{Endian, RECORD_BYTES};

    /// Coverage of `SegmentSpec::linear` (about 1968 to 2031).
    pub const LINEAR_SPAN: (f64, f64) = (-1.0e9, 1.0e9);

    /// Description of one Chebyshev segment.
    #[derive(Clone, Debug)]
    pub struct SegmentSpec {
        pub target: i32,
        pub center: i32,
        pub frame: i32,
        pub data_type: i32,
        pub init: f64,
        pub interval: f64,
        /// Per record: x, y, z coefficient lists of equal length.
        pub records: Vec<[Vec<f64>; 3]>,
        pub name: String,
        /// Replaces the `N` trailer word, to build corrupt segments.
        pub override_record_count: Option<f64>,
        /// Replaces the `RSIZE` trailer word.
        pub override_record_size: Option<f64>,
        /// Replaces every record's `RADIUS` word.
        pub override_radius: Option<f64>,
    }

    impl SegmentSpec {
        /// A single record encoding `p(t) = offset + rate * t` exactly.
        pub fn linear(target: i32, center: i32, offset: [f64; 3], rate: [f64; 3]) -> Self {
            let (start, end) = LINEAR_SPAN;
            let radius = (end - start) / 2.0;
            let mid = start + radius;
            let coefficients = |i: usize| vec![offset[i] + rate[i] * mid, rate[i] * radius];

            Self {
                target,
                center,
                frame: 1,
                data_type: 2,
                init: start,
                interval: end - start,
                records: vec![[coefficients(0), coefficients(1), coefficients(2)]],
                name: format!("{target} wrt {center}"),
                override_record_count: None,
                override_record_size: None,
                override_radius: None,
            }
        }

        /// `count` records of `interval` seconds; record `i` holds the constant
        /// position `(i, -i, 0)`.
        pub fn piecewise_constant(
            target: i32,
            center: i32,
            init: f64,
            interval: f64,
            count: usize,
        ) -> Self {
            let records = (0..count)
                .map(|i| [vec![i as f64], vec![-(i as f64)], vec![0.0]])
                .collect();

            Self {
                target,
                center,
                frame: 1,
                data_type: 2,
                init,
                interval,
                records,
                name: String::new(),
                override_record_count: None,
                override_record_size: None,
                override_radius: None,
            }
        }

        pub fn data_type(mut self, data_type: i32) -> Self {
            self.data_type = data_type;
            self
        }

        pub fn named(mut self, name: &str) -> Self {
            self.name = name.to_string();
            self
        }

        fn start(&self) -> f64 {
            self.init
        }

        fn end(&self) -> f64 {
            self.init + self.interval * self.records.len() as f64
        }

        /// Data words: records followed by the `INIT, INTLEN, RSIZE, N` trailer.
        fn words(&self) -> Vec<f64> {
            let components = if self.data_type == 3 { 6 } else { 3 };
            let n_coef = self.records.first().map_or(0, |r| r[0].len());
            let record_size = 2 + components * n_coef;
            let radius = self.interval / 2.0;

            let mut words = Vec::with_capacity(record_size * self.records.len() + 4);
            for (i, record) in self.records.iter().enumerate() {
                words.push(self.init + self.interval * i as f64 + radius);
                words.push(self.override_radius.unwrap_or(radius));
                for axis in record {
                    words.extend_from_slice(axis);
                }
                // Type 3 velocity coefficients are not evaluated
                words.extend(std::iter::repeat_n(0.0, (components - 3) * n_coef));
            }

            words.push(self.init);
            words.push(self.interval);
            words.push(self.override_record_size.unwrap_or(record_size as f64));
            words.push(
                self.override_record_count
                    .unwrap_or(self.records.len() as f64),
            );
            words
        }
    }

    /// Writes a `DAF/SPK` file: file record, one summary record, one name
    /// record, then segment data.
    #[derive(Clone, Debug)]
    pub struct SpkBuilder {
        endian: Endian,
        segments: Vec<SegmentSpec>,
    }

    impl Default for SpkBuilder {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SpkBuilder {
        pub fn new() -> Self {
            Self {
                endian: Endian::Little,
                segments: Vec::new(),
            }
        }

        pub fn endian(mut self, endian: Endian) -> Self {
            self.endian = endian;
            self
        }

        pub fn segment(mut self, spec: SegmentSpec) -> Self {
            self.segments.push(spec);
            self
        }

        pub fn build(&self) -> Vec<u8> {
            const ND: usize = 2;
            const NI: usize = 6;
            const SUMMARY_WORDS: usize = ND + NI.div_ceil(2);
            assert!(self.segments.len() <= (128 - 3) / SUMMARY_WORDS);

            let mut file = vec![0u8; 3 * RECORD_BYTES];
            let mut data: Vec<f64> = Vec::new();
            let first_data_addr = 3 * RECORD_BYTES / 8 + 1;

            let mut summary = Vec::new();
            let mut names = Vec::new();
            for spec in &self.segments {
                let words = spec.words();
                let start_addr = first_data_addr + data.len();
                let end_addr = start_addr + words.len() - 1;
                data.extend(words);

                summary.extend(self.f64_bytes(spec.start()));
                summary.extend(self.f64_bytes(spec.end()));
                for v in [
                    spec.target,
                    spec.center,
                    spec.frame,
                    spec.data_type,
                    start_addr as i32,
                    end_addr as i32,
                ] {
                    summary.extend(self.i32_bytes(v));
                }

                let mut name = spec.name.clone().into_bytes();
                name.resize(SUMMARY_WORDS * 8, b' ');
                names.extend(name);
            }

            let free = first_data_addr + data.len();

            // File record
            file[0..8].copy_from_slice(b"DAF/SPK ");
            file[8..12].copy_from_slice(&self.i32_bytes(ND as i32));
            file[12..16].copy_from_slice(&self.i32_bytes(NI as i32));
            let mut ifname = b"synthetic test kernel".to_vec();
            ifname.resize(60, b' ');
            file[16..76].copy_from_slice(&ifname);
            file[76..80].copy_from_slice(&self.i32_bytes(2));
            file[80..84].copy_from_slice(&self.i32_bytes(2));
            file[84..88].copy_from_slice(&self.i32_bytes(free as i32));
            file[88..96].copy_from_slice(self.endian.locfmt());

            // Summary record: NEXT, PREV, NSUM, summaries
            let base = RECORD_BYTES;
            file[base..base + 8].copy_from_slice(&self.f64_bytes(0.0));
            file[base + 8..base + 16].copy_from_slice(&self.f64_bytes(0.0));
            file[base + 16..base + 24].copy_from_slice(&self.f64_bytes(self.segments.len() as f64));
            file[base + 24..base + 24 + summary.len()].copy_from_slice(&summary);

            // Name record
            let base = 2 * RECORD_BYTES;
            file[base..base + names.len()].copy_from_slice(&names);

            for w in data {
                file.extend(self.f64_bytes(w));
            }
            file
        }

        fn f64_bytes(&self, v: f64) -> [u8; 8] {
            match self.endian {
                Endian::Little => v.to_le_bytes(),
                Endian::Big => v.to_be_bytes(),
            }
        }

        fn i32_bytes(&self, v: i32) -> [u8; 4] {
            match self.endian {
                Endian::Little => v.to_le_bytes(),
                Endian::Big => v.to_be_bytes(),
            }
        }
    }
}
