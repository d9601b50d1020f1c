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

//! A probabilistic counting data structure that never undercounts items as long
//! as no counter wraps. It is a table structure with the depth being the number
//! of hashes and the width being the number of buckets per hash. When an item
//! is added, each row's position is derived from one FNV-1a digest of the
//! item's bytes with enhanced double hashing, and the counter at that position
//! is incremented. Querying the count returns the minimum of these counters,
//! since some positions might collide with other items.
//!
//! The dimensions come from two probabilities: the estimate exceeds the true
//! count by at most `epsilon * N` (`N` being the total count added) with
//! probability `delta`.
//!
//! ```text
//! width = ceil(e / epsilon)
//! depth = ceil(log(1 - delta) / log(0.5))
//! ```
//!
//! [`CMSketchU64`] and its siblings guard their grid with a single
//! readers-writer lock and take `&self` everywhere, so a sketch can be shared
//! between threads directly or through an `Arc`. Sketches of equal dimensions
//! can be merged, which makes it easy to count stream partitions separately
//! and combine them afterwards. [`CounterGridU64`] and its siblings are the
//! unsynchronized grids underneath.
//!
//! E.g. add("a")
//! position(0, "a") = 2 -> increment row 0, index 2
//! position(1, "a") = 5 -> increment row 1, index 5
//! position(2, "a") = 3 -> increment row 2, index 3
//! etc.
//!
//! # Usage
//!
//! ```
//! use shared_cmsketch::CMSketchU64;
//!
//! const DELTA: f64 = 0.99;
//! const EPSILON: f64 = 0.001;
//!
//! fn main() {
//!     let cms = CMSketchU64::new(DELTA, EPSILON).unwrap();
//!     assert_eq!(cms.depth(), 7);
//!     assert_eq!(cms.width(), 2719);
//!
//!     std::thread::scope(|s| {
//!         for i in 0..4u64 {
//!             let cms = &cms;
//!             s.spawn(move || cms.add("apple", i + 1));
//!         }
//!     });
//!     assert!(cms.count("apple") >= 10);
//!
//!     let shard = CMSketchU64::new(DELTA, EPSILON).unwrap();
//!     shard.add("apple", 5);
//!     cms.merge(&shard).unwrap();
//!     assert!(cms.count("apple") >= 15);
//!
//!     cms.remove("apple", 15);
//!     assert_eq!(cms.count("apple"), 0);
//! }
//! ```

mod error;
pub use error::*;

mod params;
pub use params::dimensions;

mod hasher;
pub use hasher::*;

mod grid;
pub use grid::*;

mod sketch;
pub use sketch::*;
