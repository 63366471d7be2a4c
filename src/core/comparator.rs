//! Structural diff between two extracted or loaded structures
//!
//! Pure: no I/O, deterministic, differences are data rather than errors.

use crate::types::{CellType, StructureModel};
use std::fmt;

/// One reported difference between an expected and an actual structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    HeaderRowMismatch {
        expected_row: u32,
        actual_row: u32,
    },
    /// Present in expected, absent in actual
    MissingColumn { index: usize, name: String },
    /// Present in actual, absent in expected
    ExtraColumn { index: usize, name: String },
    NameMismatch {
        index: usize,
        expected_name: String,
        actual_name: String,
    },
    TypeMismatch {
        index: usize,
        expected_type: CellType,
        actual_type: CellType,
    },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::HeaderRowMismatch {
                expected_row,
                actual_row,
            } => write!(
                f,
                "Header row mismatch: expected row {}, got row {}",
                expected_row, actual_row
            ),
            Issue::MissingColumn { index, name } => {
                write!(f, "Missing column {} ('{}')", index, name)
            }
            Issue::ExtraColumn { index, name } => {
                write!(f, "Extra column {} ('{}')", index, name)
            }
            Issue::NameMismatch {
                index,
                expected_name,
                actual_name,
            } => write!(
                f,
                "Header mismatch in column {}: expected '{}', got '{}'",
                index, expected_name, actual_name
            ),
            Issue::TypeMismatch {
                index,
                expected_type,
                actual_type,
            } => write!(
                f,
                "Type mismatch in column {}: expected {}, got {}",
                index, expected_type, actual_type
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonResult {
    pub is_matching: bool,
    pub issues: Vec<Issue>,
}

impl ComparisonResult {
    fn from_issues(issues: Vec<Issue>) -> Self {
        Self {
            is_matching: issues.is_empty(),
            issues,
        }
    }
}

/// Diff `actual` against `expected`.
///
/// A header-row mismatch is reported first but never short-circuits the
/// column comparison; columns align by physical index, and one-sided
/// indices are reported as missing/extra. At a shared index a name-only
/// difference is a rename (`NameMismatch`) and a type-only difference a
/// retype (`TypeMismatch`); when name *and* type both change, nothing ties
/// the two columns together anymore, so the pair reports as the expected
/// column missing and the actual one extra. `sheet_metadata` is not
/// compared.
pub fn compare(expected: &StructureModel, actual: &StructureModel) -> ComparisonResult {
    let mut issues = Vec::new();

    if expected.header_row != actual.header_row {
        issues.push(Issue::HeaderRowMismatch {
            expected_row: expected.header_row,
            actual_row: actual.header_row,
        });
    }

    let span = expected.columns.len().max(actual.columns.len());
    for index in 0..span {
        match (expected.column(index), actual.column(index)) {
            (Some(want), Some(got)) => {
                let renamed = want.name != got.name;
                let retyped = want.inferred_type != got.inferred_type;
                if renamed && retyped {
                    issues.push(Issue::MissingColumn {
                        index,
                        name: want.name.clone(),
                    });
                    issues.push(Issue::ExtraColumn {
                        index,
                        name: got.name.clone(),
                    });
                } else if renamed {
                    issues.push(Issue::NameMismatch {
                        index,
                        expected_name: want.name.clone(),
                        actual_name: got.name.clone(),
                    });
                } else if retyped {
                    issues.push(Issue::TypeMismatch {
                        index,
                        expected_type: want.inferred_type,
                        actual_type: got.inferred_type,
                    });
                }
            }
            (Some(want), None) => issues.push(Issue::MissingColumn {
                index,
                name: want.name.clone(),
            }),
            (None, Some(got)) => issues.push(Issue::ExtraColumn {
                index,
                name: got.name.clone(),
            }),
            (None, None) => {}
        }
    }

    ComparisonResult::from_issues(issues)
}
