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

use paste::paste;

use crate::hasher::Positions;

macro_rules! counter_grid {
    ($( {$type:ty, $suffix:ident}, )*) => {
        paste! {
            $(
                /// A `depth` x `width` table of counters stored row-major.
                ///
                /// The grid does no synchronization of its own; every method that mutates takes
                /// `&mut self`. All arithmetic wraps at the counter's width unless the method says
                /// otherwise.
                #[derive(Debug, Clone, PartialEq, Eq)]
                pub struct [<CounterGrid $suffix>] {
                    width: usize,
                    depth: usize,

                    table: Box<[$type]>,
                }

                impl [<CounterGrid $suffix>] {
                    /// # Panics
                    ///
                    /// Panics if `depth * width` counters cannot be allocated.
                    pub fn new(depth: usize, width: usize) -> Self {
                        let table = {
                            // Use `resize` instead of `vec![]` to avoid page faults caused by delayed allocation.
                            let mut data = Vec::with_capacity(width * depth);
                            data.resize(width * depth, 0);
                            data.into_boxed_slice()
                        };

                        debug_assert!(width > 0, "width: {width}");
                        debug_assert!(depth > 0, "depth: {depth}");
                        debug_assert_eq!(table.len(), width * depth);

                        Self {
                            width,
                            depth,
                            table,
                        }
                    }

                    /// Add `count` to the counter each row's position points at.
                    pub fn add(&mut self, positions: Positions, count: $type) {
                        for (row, position) in positions.enumerate() {
                            let index = self.index(row, position);
                            self.table[index] = self.table[index].wrapping_add(count);
                        }
                    }

                    /// Subtract `count`, wrapping below zero.
                    pub fn sub(&mut self, positions: Positions, count: $type) {
                        for (row, position) in positions.enumerate() {
                            let index = self.index(row, position);
                            self.table[index] = self.table[index].wrapping_sub(count);
                        }
                    }

                    /// Subtract `count`, flooring each counter at zero.
                    pub fn sub_saturating(&mut self, positions: Positions, count: $type) {
                        for (row, position) in positions.enumerate() {
                            let index = self.index(row, position);
                            self.table[index] = self.table[index].saturating_sub(count);
                        }
                    }

                    /// The minimum over the counters the positions point at.
                    pub fn min(&self, positions: Positions) -> $type {
                        positions
                            .enumerate()
                            .map(|(row, position)| self.table[self.index(row, position)])
                            .min()
                            .unwrap_or(0)
                    }

                    /// Add every cell of `other` into the matching cell of `self`.
                    ///
                    /// Both grids must share the same dimensions.
                    pub fn merge(&mut self, other: &Self) {
                        debug_assert_eq!((self.depth, self.width), (other.depth, other.width));
                        self.table
                            .iter_mut()
                            .zip(other.table.iter())
                            .for_each(|(c, o)| *c = c.wrapping_add(*o));
                    }

                    /// Double every counter, as merging the grid into itself would.
                    pub fn double(&mut self) {
                        self.table.iter_mut().for_each(|c| *c = c.wrapping_add(*c));
                    }

                    pub fn width(&self) -> usize {
                        self.width
                    }

                    pub fn depth(&self) -> usize {
                        self.depth
                    }

                    #[inline(always)]
                    fn index(&self, row: usize, column: usize) -> usize {
                        debug_assert!(row < self.depth && column < self.width);
                        row * self.width + column
                    }
                }
            )*
        }
    };
}

macro_rules! for_all_uint_types {
    ($macro:ident) => {
        $macro! {
            {u8, U8},
            {u16, U16},
            {u32, U32},
            {u64, U64},
            {usize, Usize},
        }
    };
}

pub(crate) use for_all_uint_types;

for_all_uint_types! { counter_grid }
