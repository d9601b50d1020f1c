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

use std::f64::consts::E;

use crate::error::{Error, Result};

/// e / w = eps; w = e / eps
pub(crate) fn width(epsilon: f64) -> usize {
    (E / epsilon).ceil() as usize
}

/// 1 / 2^depth <= 1 - delta; depth >= log(1 - delta) / log(0.5)
///
/// delta => depth:
///
/// 0.9     => 4
/// 0.99    => 7
/// 0.999   => 10
/// 0.9999  => 14
/// 0.99999 => 17
pub(crate) fn depth(delta: f64) -> usize {
    ((1.0 - delta).ln() / 0.5f64.ln()).ceil() as usize
}

/// Derive `(depth, width)` from the confidence `delta` and the error factor `epsilon`.
///
/// Fails with [`Error::InvalidParameter`] unless `0 < delta < 1` and `epsilon > 0`.
///
/// ```
/// use shared_cmsketch::dimensions;
///
/// assert_eq!(dimensions(0.9, 0.01).unwrap(), (4, 272));
/// assert!(dimensions(1.0, 0.01).is_err());
/// ```
pub fn dimensions(delta: f64, epsilon: f64) -> Result<(usize, usize)> {
    if !(delta > 0.0 && delta < 1.0) {
        return Err(Error::InvalidParameter {
            name: "delta",
            value: delta,
        });
    }
    if !(epsilon > 0.0) {
        return Err(Error::InvalidParameter {
            name: "epsilon",
            value: epsilon,
        });
    }
    Ok((depth(delta), width(epsilon)))
}
