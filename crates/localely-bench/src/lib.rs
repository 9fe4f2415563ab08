//! Shared inputs for the localely benchmarks.

/// A mixed corpus: source-code-like ASCII, high-half bytes, control codes and
/// EOF markers, as `i32` input codes.
#[must_use]
pub fn mixed_corpus(len: usize) -> Vec<i32> {
    const SAMPLE: &[u8] = b"fn main() {\n\tlet x = 0x1F + 42; // comment\r\n}\x7F\x00";
    (0..len)
        .map(|i| match i % 97 {
            0 => -1,
            1..=8 => 0x80 + (i % 128) as i32,
            _ => i32::from(SAMPLE[i % SAMPLE.len()]),
        })
        .collect()
}
