//! Determinism verification.
//!
//! Runs a generation closure several times and compares the outputs byte by
//! byte, reporting the first difference.

use std::fmt;

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Size of the output in bytes.
    pub output_size: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// If non-deterministic, the first difference found.
    pub diff_info: Option<DiffInfo>,
}

/// First byte difference found between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffInfo {
    /// Byte offset of the difference, or the shorter length on a size mismatch.
    pub offset: usize,
    /// Byte from the first run, if it has one at `offset`.
    pub expected: Option<u8>,
    /// Byte from the differing run, if it has one at `offset`.
    pub actual: Option<u8>,
    /// Which run (0-indexed) differed from run 0.
    pub run_index: usize,
}

impl fmt::Display for DiffInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let byte = |b: Option<u8>| match b {
            Some(b) => format!("0x{:02X}", b),
            None => "end of output".to_string(),
        };
        write!(
            f,
            "Difference at byte {}: expected {}, got {} (run {})",
            self.offset,
            byte(self.expected),
            byte(self.actual),
            self.run_index
        )
    }
}

impl DeterminismResult {
    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(diff) = &self.diff_info {
            panic!(
                "Non-deterministic output detected!\n\
                 Runs: {}\n\
                 Output size: {} bytes\n\
                 Hash: {}\n\
                 {}",
                self.runs, self.output_size, self.hash, diff
            );
        }
    }
}

/// BLAKE3 hex digest of `data`.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Little-endian bit patterns of a sample buffer, for exact comparison.
pub fn samples_to_bytes(samples: &[f64]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_bits().to_le_bytes()).collect()
}

fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    a.iter()
        .zip(b)
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len())))
}

/// Runs `generate_fn` `runs` times (at least 2) and compares every output
/// with the first.
pub fn verify_determinism<F, T>(mut generate_fn: F, runs: usize) -> DeterminismResult
where
    F: FnMut() -> T,
    T: AsRef<[u8]>,
{
    let runs = runs.max(2);
    let first = generate_fn().as_ref().to_vec();
    let hash = compute_hash(&first);

    for run_index in 1..runs {
        let output = generate_fn();
        let output = output.as_ref();
        if let Some(offset) = first_difference(&first, output) {
            let diff = DiffInfo {
                offset,
                expected: first.get(offset).copied(),
                actual: output.get(offset).copied(),
                run_index,
            };
            return DeterminismResult {
                is_deterministic: false,
                runs: run_index + 1,
                output_size: first.len(),
                hash,
                diff_info: Some(diff),
            };
        }
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        output_size: first.len(),
        hash,
        diff_info: None,
    }
}

/// Generates a test that runs an expression several times and asserts
/// byte-identical output. The expression must return `AsRef<[u8]>`.
#[macro_export]
macro_rules! test_determinism {
    ($name:ident, $generate:expr) => {
        $crate::test_determinism!($name, runs = 3, $generate);
    };

    ($name:ident, runs = $runs:expr, $generate:expr) => {
        #[test]
        fn $name() {
            $crate::determinism::verify_determinism(|| $generate, $runs).assert_deterministic();
        }
    };
}
