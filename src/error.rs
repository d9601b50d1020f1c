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

use std::fmt;

/// Errors returned by sketch construction and merging.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Two sketches with different `(depth, width)` cannot be merged.
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// A sizing parameter is outside its valid range.
    InvalidParameter { name: &'static str, value: f64 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DimensionMismatch { expected, found } => write!(
                f,
                "cannot merge sketches with different dimensions: expected (depth: {}, width: {}), found (depth: {}, width: {})",
                expected.0, expected.1, found.0, found.1
            ),
            Error::InvalidParameter { name, value } => {
                write!(f, "invalid parameter {}: {}", name, value)
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::DimensionMismatch {
            expected: (4, 272),
            found: (7, 2719),
        };
        assert_eq!(
            err.to_string(),
            "cannot merge sketches with different dimensions: expected (depth: 4, width: 272), found (depth: 7, width: 2719)"
        );

        let err = Error::InvalidParameter {
            name: "delta",
            value: 1.5,
        };
        assert_eq!(err.to_string(), "invalid parameter delta: 1.5");
    }
}
