//! Merging manual shot corrections into a detected shot set
//!
//! Callers persist shots as numeric rows (legacy records carry 2-column
//! x/y rows, current ones 3-column x/y/radius) and may supply manual
//! corrections in either shape. Rows are normalized to 3 columns with
//! the default radius and validated; manual shots are appended after
//! automatic ones and are deliberately not re-validated or
//! re-deduplicated — they are the shooter's corrections, not
//! candidates.

use crate::error::{Error, Result};
use crate::models::{DEFAULT_SHOT_RADIUS, Shot};

/// Parse persisted or caller-supplied shot rows.
///
/// Accepts 2-column `[x, y]` and 3-column `[x, y, radius]` rows;
/// 2-column rows get the default radius. Any other width, or a
/// negative coordinate or radius, is a `MalformedShotArray`.
pub fn shots_from_rows(rows: &[Vec<f64>]) -> Result<Vec<Shot>> {
    rows.iter()
        .map(|row| {
            let (x, y, radius) = match row.as_slice() {
                [x, y] => (*x, *y, DEFAULT_SHOT_RADIUS as f64),
                [x, y, radius] => (*x, *y, *radius),
                _ => return Err(Error::MalformedShotArray),
            };
            if x < 0.0 || y < 0.0 || radius < 0.0 {
                return Err(Error::MalformedShotArray);
            }
            Ok(Shot::new(x as i32, y as i32, radius as i32))
        })
        .collect()
}

/// Combine automatically detected shots with manual corrections.
///
/// Automatic shots come first, manual rows (normalized through
/// [`shots_from_rows`]) are appended. The result is the new
/// authoritative shot set for metrics and annotation.
pub fn merge_shots(auto: &[Shot], manual: &[Vec<f64>]) -> Result<Vec<Shot>> {
    let mut merged = auto.to_vec();
    merged.extend(shots_from_rows(manual)?);
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_column_rows_get_default_radius() {
        let auto = shots_from_rows(&[vec![10.0, 20.0], vec![300.0, 40.0]]).unwrap();
        let merged = merge_shots(&auto, &[vec![150.0, 150.0]]).unwrap();
        assert_eq!(merged.len(), 3);
        assert!(merged.iter().all(|s| s.radius == DEFAULT_SHOT_RADIUS));
    }

    #[test]
    fn explicit_radius_is_preserved() {
        let merged = merge_shots(&[], &[vec![5.0, 6.0, 14.0]]).unwrap();
        assert_eq!(merged, vec![Shot::new(5, 6, 14)]);
    }

    #[test]
    fn automatic_rows_precede_manual_rows() {
        let auto = [Shot::at(1, 1)];
        let merged = merge_shots(&auto, &[vec![2.0, 2.0]]).unwrap();
        assert_eq!(merged[0], Shot::at(1, 1));
        assert_eq!(merged[1], Shot::at(2, 2));
    }

    #[test]
    fn manual_shots_near_auto_shots_are_kept() {
        // corrections are additive: no re-deduplication against auto shots
        let auto = [Shot::at(100, 100)];
        let merged = merge_shots(&auto, &[vec![103.0, 101.0]]).unwrap();
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn bad_widths_are_malformed() {
        for row in [vec![], vec![1.0], vec![1.0, 2.0, 3.0, 4.0]] {
            assert_eq!(
                shots_from_rows(&[row]).unwrap_err(),
                Error::MalformedShotArray
            );
        }
    }

    #[test]
    fn negative_values_are_malformed() {
        for row in [vec![-1.0, 5.0], vec![5.0, -1.0], vec![5.0, 5.0, -2.0]] {
            assert_eq!(
                shots_from_rows(&[row]).unwrap_err(),
                Error::MalformedShotArray
            );
        }
    }

    #[test]
    fn empty_inputs_merge_to_empty() {
        assert!(merge_shots(&[], &[]).unwrap().is_empty());
    }
}
