//  Copyright 2023 MrCroxx
//
//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

use std::hash::Hasher;

use fnv::FnvHasher;

/// Maps an item to one column per row with enhanced double hashing.
///
/// A single 64-bit FNV-1a digest is split into an upper and a lower 32-bit half,
/// and row `i` lands on `(upper * i + lower) % width`. The hasher holds no
/// scratch state between calls, so it can be shared freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionalHasher {
    depth: usize,
    width: usize,
}

impl PositionalHasher {
    pub fn new(depth: usize, width: usize) -> Self {
        debug_assert!(depth > 0, "depth: {depth}");
        debug_assert!(width > 0, "width: {width}");
        Self { depth, width }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the `depth` columns of `item`, one per row in row order.
    pub fn positions(&self, item: &[u8]) -> Positions {
        let (upper, lower) = upper_and_lower(digest(item));
        Positions {
            upper,
            lower,
            width: self.width as u64,
            row: 0,
            depth: self.depth,
        }
    }
}

/// Iterator over the per-row columns of a single item.
#[derive(Debug, Clone)]
pub struct Positions {
    upper: u64,
    lower: u64,
    width: u64,
    row: usize,
    depth: usize,
}

impl Iterator for Positions {
    type Item = usize;

    #[inline(always)]
    fn next(&mut self) -> Option<usize> {
        if self.row >= self.depth {
            return None;
        }
        let position = self
            .upper
            .wrapping_mul(self.row as u64)
            .wrapping_add(self.lower)
            % self.width;
        self.row += 1;
        Some(position as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.depth - self.row;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Positions {}

#[inline(always)]
fn digest(item: &[u8]) -> u64 {
    // `write` instead of `Hash::hash` so no length prefix is mixed in.
    let mut hasher = FnvHasher::default();
    hasher.write(item);
    hasher.finish()
}

/// Split a digest into the big-endian halves of its 8-byte encoding.
#[inline(always)]
fn upper_and_lower(digest: u64) -> (u64, u64) {
    let bytes = digest.to_be_bytes();
    let upper = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let lower = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    (upper as u64, lower as u64)
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand_mt::Mt64;

    use super::*;

    #[test]
    fn test_upper_and_lower() {
        assert_eq!(
            upper_and_lower(0x0123_4567_89ab_cdef),
            (0x0123_4567, 0x89ab_cdef)
        );
    }

    #[test]
    fn test_positions_in_range() {
        let hasher = PositionalHasher::new(7, 2719);
        let mut rng = Mt64::new_unseeded();

        for _ in 0..1000 {
            let item = rng.next_u64().to_le_bytes();
            let positions = hasher.positions(&item);
            assert_eq!(positions.len(), 7);
            assert!(positions.into_iter().all(|p| p < 2719));
        }
    }

    #[test]
    fn test_positions_follow_double_hashing() {
        let hasher = PositionalHasher::new(10, 27183);
        let (upper, lower) = upper_and_lower(digest(b"Alex"));
        let expected = (0..10u64)
            .map(|i| ((upper * i + lower) % 27183) as usize)
            .collect_vec();
        assert_eq!(hasher.positions(b"Alex").collect_vec(), expected);
    }

    #[test]
    fn test_deterministic() {
        let a = PositionalHasher::new(4, 272);
        let b = PositionalHasher::new(4, 272);
        for item in [&b""[..], &b"Alex"[..], &b"abcdefgh123456789"[..]] {
            assert_eq!(a.positions(item).collect_vec(), a.positions(item).collect_vec());
            assert_eq!(a.positions(item).collect_vec(), b.positions(item).collect_vec());
        }
    }

    #[test]
    fn test_empty_item() {
        let hasher = PositionalHasher::new(4, 272);
        assert_eq!(hasher.positions(b"").count(), 4);
    }

    #[test]
    fn test_concurrent_positions() {
        let hasher = PositionalHasher::new(14, 27183);
        let mut rng = Mt64::new_unseeded();
        let items = (0..256).map(|_| rng.next_u64().to_le_bytes()).collect_vec();
        let expected = items
            .iter()
            .map(|item| hasher.positions(item).collect_vec())
            .collect_vec();

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for (item, expected) in items.iter().zip(expected.iter()) {
                        assert_eq!(&hasher.positions(item).collect_vec(), expected);
                    }
                });
            }
        });
    }
}
