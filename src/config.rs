// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Generator options.
//!
//! Both option sets serialize with serde; missing fields take their defaults.

use crate::error::BranchingError;
use crate::orbifold::Curvature;
use serde::{Deserialize, Serialize};

/// Branching numbers tried by default, in ascending order.
pub const DEFAULT_ADMISSIBLE_VALUES: [u32; 5] = [1, 2, 3, 4, 6];

fn default_admissible_values() -> Vec<u32> {
    DEFAULT_ADMISSIBLE_VALUES.to_vec()
}

fn default_min_degree() -> u32 {
    3
}

/// Options for [`crate::engine::DefineBranching3d`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchingOptions {
    #[serde(default = "default_admissible_values")]
    pub admissible_values: Vec<u32>,
    /// Accept edges of degree 2.
    #[serde(default)]
    pub allow_edge_degree_two: bool,
}

impl Default for BranchingOptions {
    fn default() -> Self {
        Self {
            admissible_values: default_admissible_values(),
            allow_edge_degree_two: false,
        }
    }
}

impl BranchingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_admissible_values(mut self, values: impl Into<Vec<u32>>) -> Self {
        self.admissible_values = values.into();
        self
    }

    pub fn with_edge_degree_two(mut self, allow: bool) -> Self {
        self.allow_edge_degree_two = allow;
        self
    }

    pub(crate) fn min_edge_degree(&self) -> u32 {
        if self.allow_edge_degree_two {
            2
        } else {
            3
        }
    }
}

/// Options for [`crate::engine::DefineBranching2d`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchingOptions2d {
    #[serde(default = "default_admissible_values")]
    pub admissible_values: Vec<u32>,
    #[serde(default = "default_min_degree")]
    pub min_face_degree: u32,
    #[serde(default = "default_min_degree")]
    pub min_vertex_degree: u32,
    /// Lower bound on the curvature of emitted symbols.
    #[serde(default)]
    pub min_curvature: Curvature,
}

impl Default for BranchingOptions2d {
    fn default() -> Self {
        Self {
            admissible_values: default_admissible_values(),
            min_face_degree: default_min_degree(),
            min_vertex_degree: default_min_degree(),
            min_curvature: Curvature::zero(),
        }
    }
}

impl BranchingOptions2d {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_admissible_values(mut self, values: impl Into<Vec<u32>>) -> Self {
        self.admissible_values = values.into();
        self
    }

    pub fn with_min_face_degree(mut self, degree: u32) -> Self {
        self.min_face_degree = degree;
        self
    }

    pub fn with_min_vertex_degree(mut self, degree: u32) -> Self {
        self.min_vertex_degree = degree;
        self
    }

    pub fn with_min_curvature(mut self, curvature: Curvature) -> Self {
        self.min_curvature = curvature;
        self
    }
}

/// Sorted, deduplicated admissible values, or the reason they are unusable.
pub(crate) fn normalize_admissible(values: &[u32]) -> Result<Vec<u32>, BranchingError> {
    if values.contains(&0) {
        return Err(BranchingError::NonPositiveValue {
            values: values.to_vec(),
        });
    }
    if !values.contains(&1) || !values.contains(&2) {
        return Err(BranchingError::MissingBasicValues {
            values: values.to_vec(),
        });
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = BranchingOptions::default();
        assert_eq!(options.admissible_values, vec![1, 2, 3, 4, 6]);
        assert_eq!(options.min_edge_degree(), 3);
        assert_eq!(options.with_edge_degree_two(true).min_edge_degree(), 2);

        let options = BranchingOptions2d::default();
        assert_eq!(options.min_face_degree, 3);
        assert_eq!(options.min_vertex_degree, 3);
        assert_eq!(options.min_curvature, Curvature::zero());
    }

    #[test]
    fn test_normalize_admissible() {
        assert_eq!(normalize_admissible(&[6, 2, 1, 2]), Ok(vec![1, 2, 6]));
        assert_eq!(
            normalize_admissible(&[1, 3]),
            Err(BranchingError::MissingBasicValues { values: vec![1, 3] })
        );
        assert!(matches!(
            normalize_admissible(&[0, 1, 2]),
            Err(BranchingError::NonPositiveValue { .. })
        ));
    }
}
