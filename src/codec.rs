//! Compact wire codec: one 32-bit word per step
//!
//! Each word packs a 6-bit label index (high bits) and a 26-bit whole
//! microsecond duration (low bits). The label vocabulary is shared out of
//! band; position in the vocabulary is the 0-based wire index. Sub-microsecond
//! precision is lost by design.

use std::collections::HashMap;

use crate::error::{StopwatchError, StopwatchResult};
use crate::results::{Results, Step};

/// Hard ceiling on vocabulary size: the index field is 6 bits wide
pub const MAX_LABELS: usize = 64;

/// Hard ceiling on a single step's duration in whole microseconds
/// (`2^26 - 1`, about 67.1 seconds)
pub const MAX_STEP_MICROS: u32 = (1 << 26) - 1;

const INDEX_SHIFT: u32 = 26;
const NANOS_PER_MICRO: i64 = 1_000;

/// Encode results into one `(index << 26) | microseconds` word per step,
/// preserving step order.
///
/// Fails when the vocabulary holds more than [`MAX_LABELS`] entries, a step's
/// label is absent from it, or a step's duration truncated to whole
/// microseconds exceeds [`MAX_STEP_MICROS`].
pub fn encode(labels: &[String], results: &Results) -> StopwatchResult<Vec<u32>> {
    if labels.len() > MAX_LABELS {
        return Err(StopwatchError::TooManyLabels {
            count: labels.len(),
            max: MAX_LABELS,
        });
    }

    let index_of: HashMap<&str, usize> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| (label.as_str(), i))
        .collect();

    let mut out = Vec::with_capacity(results.steps.len());
    for step in &results.steps {
        let index = *index_of
            .get(step.label.as_str())
            .ok_or_else(|| StopwatchError::UnknownLabel {
                label: step.label.clone(),
            })?;

        // Truncation toward zero; negative durations never fit
        let micros = step.duration / NANOS_PER_MICRO;
        if micros < 0 || micros > MAX_STEP_MICROS as i64 {
            return Err(StopwatchError::DurationOverflow {
                label: step.label.clone(),
                micros,
                max: MAX_STEP_MICROS,
            });
        }

        out.push(((index as u32) << INDEX_SHIFT) | micros as u32);
    }

    Ok(out)
}

/// Decode words back into results, restoring durations at microsecond
/// granularity. The vocabulary must match the encode-time one by position.
///
/// Fails when the vocabulary holds more than [`MAX_LABELS`] entries or a
/// word's index has no vocabulary entry.
pub fn decode(labels: &[String], words: &[u32]) -> StopwatchResult<Results> {
    if labels.len() > MAX_LABELS {
        return Err(StopwatchError::TooManyLabels {
            count: labels.len(),
            max: MAX_LABELS,
        });
    }

    let mut steps = Vec::with_capacity(words.len());
    for &word in words {
        let micros = word & MAX_STEP_MICROS;
        let index = word >> INDEX_SHIFT;

        let label = labels
            .get(index as usize)
            .ok_or(StopwatchError::UnknownIndex { index })?;

        steps.push(Step {
            label: label.clone(),
            duration: micros as i64 * NANOS_PER_MICRO,
        });
    }

    Ok(Results { steps })
}

/// [`encode`], then lay the words out as a little-endian byte stream
pub fn encode_bytes(labels: &[String], results: &Results) -> StopwatchResult<Vec<u8>> {
    let words = encode(labels, results)?;
    let mut out = Vec::with_capacity(words.len() * 4);
    for word in words {
        out.extend_from_slice(&word.to_le_bytes());
    }
    Ok(out)
}

/// Reassemble little-endian 4-byte words, then [`decode`]
pub fn decode_bytes(labels: &[String], data: &[u8]) -> StopwatchResult<Results> {
    if data.len() % 4 != 0 {
        return Err(StopwatchError::TruncatedStream { len: data.len() });
    }
    let words: Vec<u32> = data
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    decode(labels, &words)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: i64 = 1_000_000;

    fn vocab(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    fn step(label: &str, duration: i64) -> Step {
        Step {
            label: label.to_string(),
            duration,
        }
    }

    #[test]
    fn test_round_trip() {
        let results = Results {
            steps: vec![
                step("B", MS),
                step("D", 2 * MS),
                step("A", 3 * MS),
                step("F", 4 * MS),
                step("E", 5 * MS),
            ],
        };
        let labels = vocab(&["A", "B", "C", "D", "E", "F"]);

        let encoded = encode(&labels, &results).unwrap();
        let decoded = decode(&labels, &encoded).unwrap();
        assert_eq!(decoded, results);
    }

    #[test]
    fn test_round_trip_truncates_to_microseconds() {
        let labels = vocab(&["a"]);
        let results = Results {
            steps: vec![step("a", 1_234_567)],
        };
        let decoded = decode(&labels, &encode(&labels, &results).unwrap()).unwrap();
        assert_eq!(decoded.steps[0].duration, 1_234_000);
    }

    #[test]
    fn test_duration_boundary() {
        let labels = vocab(&["a"]);
        let max_nanos = MAX_STEP_MICROS as i64 * 1_000;

        let at_limit = Results {
            steps: vec![step("a", max_nanos)],
        };
        let words = encode(&labels, &at_limit).unwrap();
        assert_eq!(words[0], MAX_STEP_MICROS);
        assert_eq!(decode(&labels, &words).unwrap(), at_limit);

        let over_limit = Results {
            steps: vec![step("a", max_nanos + 1_000)],
        };
        let err = encode(&labels, &over_limit).unwrap_err();
        assert!(matches!(err, StopwatchError::DurationOverflow { .. }));
        assert!(!err.is_fault());
    }

    #[test]
    fn test_negative_duration_rejected() {
        let labels = vocab(&["a"]);
        let results = Results {
            steps: vec![step("a", -1_000)],
        };
        assert!(matches!(
            encode(&labels, &results).unwrap_err(),
            StopwatchError::DurationOverflow { .. }
        ));
    }

    #[test]
    fn test_vocabulary_limit() {
        let labels_64: Vec<String> = (0..64).map(|i| format!("label{}", i)).collect();
        let labels_65: Vec<String> = (0..65).map(|i| format!("label{}", i)).collect();
        let results = Results {
            steps: vec![step("label63", MS)],
        };

        assert!(encode(&labels_64, &results).is_ok());
        assert!(decode(&labels_64, &[]).is_ok());

        assert!(matches!(
            encode(&labels_65, &results).unwrap_err(),
            StopwatchError::TooManyLabels { count: 65, max: 64 }
        ));
        assert!(matches!(
            decode(&labels_65, &[]).unwrap_err(),
            StopwatchError::TooManyLabels { count: 65, max: 64 }
        ));
    }

    #[test]
    fn test_index_uses_high_bits() {
        let labels_64: Vec<String> = (0..64).map(|i| format!("label{}", i)).collect();
        let results = Results {
            steps: vec![step("label63", MS)],
        };
        let words = encode(&labels_64, &results).unwrap();
        assert_eq!(words[0] >> 26, 63);
        assert_eq!(words[0] & MAX_STEP_MICROS, 1_000);
    }

    #[test]
    fn test_unknown_label() {
        let labels = vocab(&["a", "b"]);
        let results = Results {
            steps: vec![step("zzz", MS)],
        };
        let err = encode(&labels, &results).unwrap_err();
        assert!(matches!(err, StopwatchError::UnknownLabel { .. }));
        assert!(err.to_string().contains("zzz"));
    }

    #[test]
    fn test_unknown_index() {
        let labels = vocab(&["a", "b"]);
        // Index 5 with two vocabulary entries
        let word = 5u32 << 26;
        let err = decode(&labels, &[word]).unwrap_err();
        assert!(matches!(err, StopwatchError::UnknownIndex { index: 5 }));
    }

    #[test]
    fn test_duplicate_step_labels_encode() {
        let labels = vocab(&["retry"]);
        let results = Results {
            steps: vec![step("retry", MS), step("retry", 2 * MS)],
        };
        let decoded = decode(&labels, &encode(&labels, &results).unwrap()).unwrap();
        assert_eq!(decoded, results);
    }

    #[test]
    fn test_byte_stream_round_trip() {
        let labels = vocab(&["a", "b"]);
        let results = Results {
            steps: vec![step("b", MS), step("a", 2 * MS)],
        };

        let bytes = encode_bytes(&labels, &results).unwrap();
        assert_eq!(bytes.len(), 8);
        assert_eq!(decode_bytes(&labels, &bytes).unwrap(), results);
    }

    #[test]
    fn test_byte_stream_endianness_is_fixed() {
        let labels = vocab(&["a"]);
        let results = Results {
            steps: vec![step("a", 1_000)], // 1 microsecond
        };
        let bytes = encode_bytes(&labels, &results).unwrap();
        assert_eq!(bytes, vec![1, 0, 0, 0]);
    }

    #[test]
    fn test_truncated_byte_stream() {
        let labels = vocab(&["a"]);
        assert!(matches!(
            decode_bytes(&labels, &[1, 0, 0]).unwrap_err(),
            StopwatchError::TruncatedStream { len: 3 }
        ));
    }
}
