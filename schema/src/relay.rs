use std::collections::VecDeque;

use crate::error::CodecError;

/// The out-of-band FIFO of sequence element counts. During encode, every
/// sequence encountered pushes its element count here instead of writing an
/// inline prefix; during decode the same counts are pulled back in the same
/// depth-first, left-to-right order.
///
/// A queue is scoped to a single top-level encode or decode call. Pulling
/// from an empty queue means the two sides disagree about the type's shape
/// and is reported as a protocol mismatch, never treated as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LengthQueue {
    counts: VecDeque<usize>,
}

impl LengthQueue {
    pub fn new() -> LengthQueue {
        LengthQueue::default()
    }

    /// Record the element count of a sequence encountered during encode.
    pub fn push(&mut self, count: usize) {
        self.counts.push_back(count);
    }

    /// Take the next count during decode. Fails if the queue is empty: a
    /// well-formed matching encode/decode pair never drains it prematurely.
    pub fn pull(&mut self) -> Result<usize, CodecError> {
        self.counts.pop_front().ok_or_else(|| {
            CodecError::ProtocolMismatch(
                "length relay queue drained early; encode and decode types disagree".to_owned(),
            )
        })
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The queued counts in relay order, for inspection.
    pub fn counts(&self) -> Vec<usize> {
        self.counts.iter().copied().collect()
    }
}

impl From<Vec<usize>> for LengthQueue {
    fn from(counts: Vec<usize>) -> LengthQueue {
        LengthQueue {
            counts: counts.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let mut queue = LengthQueue::new();
        queue.push(3);
        queue.push(0);
        queue.push(7);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pull(), Ok(3));
        assert_eq!(queue.pull(), Ok(0));
        assert_eq!(queue.pull(), Ok(7));
        assert!(queue.is_empty());
    }

    #[test]
    fn pull_empty_is_mismatch() {
        let mut queue = LengthQueue::new();
        assert!(matches!(
            queue.pull(),
            Err(CodecError::ProtocolMismatch(_))
        ));
        queue.push(1);
        assert_eq!(queue.pull(), Ok(1));
        assert!(matches!(
            queue.pull(),
            Err(CodecError::ProtocolMismatch(_))
        ));
    }

    #[test]
    fn counts_snapshot() {
        let queue = LengthQueue::from(vec![2, 0, 5]);
        assert_eq!(queue.counts(), vec![2, 0, 5]);
        assert_eq!(queue, LengthQueue::from(vec![2, 0, 5]));
    }
}
