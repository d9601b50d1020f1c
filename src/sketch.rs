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

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use paste::paste;

use crate::error::{Error, Result};
use crate::grid::*;
use crate::hasher::PositionalHasher;
use crate::params;

macro_rules! cmsketch {
    ($( {$type:ty, $suffix:ident}, )*) => {
        paste! {
            $(
                /// A count min sketch that can be shared between threads.
                ///
                /// The whole grid sits behind one readers-writer lock. Writers update all `depth`
                /// counters of an item under a single exclusive guard, so no other reader or
                /// writer observes a partially applied update.
                #[derive(Debug)]
                pub struct [<CMSketch $suffix>] {
                    hasher: PositionalHasher,
                    grid: RwLock<[<CounterGrid $suffix>]>,
                }

                impl [<CMSketch $suffix>] {
                    /// Create a sketch whose estimates overcount by at most `epsilon * N` with
                    /// probability `delta`, where `N` is the total count added.
                    ///
                    /// width = ceil(e / epsilon)
                    /// depth = ceil(log(1 - delta) / log(0.5))
                    ///
                    /// Fails with [`Error::InvalidParameter`] unless `0 < delta < 1` and
                    /// `epsilon > 0`.
                    pub fn new(delta: f64, epsilon: f64) -> Result<Self> {
                        let (depth, width) = params::dimensions(delta, epsilon)?;
                        Self::with_dimensions(depth, width)
                    }

                    /// Create a sketch with explicit dimensions. Both must be positive, and the
                    /// `depth * width` counters must fit in one allocation.
                    pub fn with_dimensions(depth: usize, width: usize) -> Result<Self> {
                        if depth == 0 {
                            return Err(Error::InvalidParameter { name: "depth", value: depth as f64 });
                        }
                        if width == 0 {
                            return Err(Error::InvalidParameter { name: "width", value: width as f64 });
                        }
                        // The whole table is a single allocation, bounded by `isize::MAX` bytes.
                        let fits = depth
                            .checked_mul(width)
                            .and_then(|size| size.checked_mul(std::mem::size_of::<$type>()))
                            .is_some_and(|bytes| bytes <= isize::MAX as usize);
                        if !fits {
                            return Err(Error::InvalidParameter {
                                name: "size",
                                value: depth as f64 * width as f64,
                            });
                        }

                        Ok(Self {
                            hasher: PositionalHasher::new(depth, width),
                            grid: RwLock::new([<CounterGrid $suffix>]::new(depth, width)),
                        })
                    }

                    pub fn add(&self, item: impl AsRef<[u8]>, count: $type) {
                        let positions = self.hasher.positions(item.as_ref());
                        self.write().add(positions, count);
                    }

                    /// Subtract `count` from every row of `item`.
                    ///
                    /// Counters are unsigned and wrap around when `count` exceeds their current
                    /// value, turning the estimate into a huge number. Use
                    /// [`remove_saturating`](Self::remove_saturating) or check
                    /// [`count`](Self::count) first when that matters.
                    pub fn remove(&self, item: impl AsRef<[u8]>, count: $type) {
                        let positions = self.hasher.positions(item.as_ref());
                        self.write().sub(positions, count);
                    }

                    /// Like [`remove`](Self::remove), but floors every counter at zero.
                    pub fn remove_saturating(&self, item: impl AsRef<[u8]>, count: $type) {
                        let positions = self.hasher.positions(item.as_ref());
                        self.write().sub_saturating(positions, count);
                    }

                    /// Estimated count of `item`: the minimum over its counters.
                    pub fn count(&self, item: impl AsRef<[u8]>) -> $type {
                        let positions = self.hasher.positions(item.as_ref());
                        self.read().min(positions)
                    }

                    /// Add every counter of `other` into `self`.
                    ///
                    /// Fails with [`Error::DimensionMismatch`] before touching either sketch when
                    /// the dimensions differ. `other` is read under its own shared lock for the
                    /// duration of the merge.
                    pub fn merge(&self, other: &Self) -> Result<()> {
                        if (self.depth(), self.width()) != (other.depth(), other.width()) {
                            return Err(Error::DimensionMismatch {
                                expected: (self.depth(), self.width()),
                                found: (other.depth(), other.width()),
                            });
                        }

                        if std::ptr::eq(self, other) {
                            self.write().double();
                            return Ok(());
                        }

                        // Acquire in address order so opposing merges cannot deadlock.
                        if (self as *const Self) < (other as *const Self) {
                            let mut grid = self.write();
                            grid.merge(&other.read());
                        } else {
                            let source = other.read();
                            self.write().merge(&source);
                        }

                        Ok(())
                    }

                    pub fn width(&self) -> usize {
                        self.hasher.width()
                    }

                    pub fn depth(&self) -> usize {
                        self.hasher.depth()
                    }

                    /// Total number of counters, `depth * width`.
                    pub fn size(&self) -> usize {
                        self.depth() * self.width()
                    }

                    // Grid updates are plain integer arithmetic and cannot leave it half written,
                    // so a poisoned lock still guards a consistent grid.
                    fn read(&self) -> RwLockReadGuard<'_, [<CounterGrid $suffix>]> {
                        self.grid.read().unwrap_or_else(PoisonError::into_inner)
                    }

                    fn write(&self) -> RwLockWriteGuard<'_, [<CounterGrid $suffix>]> {
                        self.grid.write().unwrap_or_else(PoisonError::into_inner)
                    }
                }

                impl Clone for [<CMSketch $suffix>] {
                    fn clone(&self) -> Self {
                        Self {
                            hasher: self.hasher,
                            grid: RwLock::new(self.read().clone()),
                        }
                    }
                }
            )*
        }
    };
}

for_all_uint_types! { cmsketch }
