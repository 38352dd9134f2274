//! Gaussian height deposits.
//!
//! Every change to a height field goes through [`GaussianDeposit::deposit`]:
//! a square neighborhood around a center point receives `weight * multiplier`,
//! where `weight` is the normal probability density at the cell's distance from
//! the center. The kernel is not normalized to its peak, so a wider deposit is
//! also a lower one (peak falls off as `1 / deviation^2`).

use std::f32::consts::PI;

use crate::error::FieldError;
use crate::heightfield::HeightField;

/// Normal probability density with the given mean and standard deviation.
#[inline]
pub fn normal_distribution(mean: f32, std_dev: f32, x: f32) -> f32 {
    let offset = x - mean;
    density_at_sq(offset * offset, std_dev)
}

/// Density at squared distance `d2` from a zero mean.
#[inline]
fn density_at_sq(d2: f32, std_dev: f32) -> f32 {
    let variance = std_dev * std_dev;
    (-d2 / (2.0 * variance)).exp() / (std_dev * (2.0 * PI * variance).sqrt())
}

/// Peak value a single deposit adds at its center.
#[inline]
pub fn peak_height(height_multiplier: f32, deviation: f32) -> f32 {
    height_multiplier * normal_distribution(0.0, deviation, 0.0)
}

/// Stamps Gaussian bumps (or pits, with a negative multiplier) into a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussianDeposit {
    /// Neighborhood radius in standard deviations
    pub area: f32,
}

impl GaussianDeposit {
    pub fn new(area: f32) -> Self {
        Self { area }
    }

    /// Half-width of the affected square, in whole cells.
    pub fn radius(&self, deviation: f32) -> usize {
        (deviation * self.area).max(0.0) as usize
    }

    /// Add a Gaussian bump centered on `(cx, cy)` and return the resulting
    /// height at the center. The neighborhood is clipped to the field; the
    /// center itself must be inside it.
    pub fn deposit(
        &self,
        field: &mut HeightField,
        cx: usize,
        cy: usize,
        height_multiplier: f32,
        deviation: f32,
    ) -> Result<f32, FieldError> {
        // Reject a bad center before touching any cell.
        field.get(cx, cy)?;

        let r = self.radius(deviation);
        let x0 = cx.saturating_sub(r);
        let x1 = cx.saturating_add(r).min(field.width());
        let y0 = cy.saturating_sub(r);
        let y1 = cy.saturating_add(r).min(field.height());

        for y in y0..=y1 {
            let dy = y as f32 - cy as f32;
            for x in x0..=x1 {
                let dx = x as f32 - cx as f32;
                let weight = density_at_sq(dx * dx + dy * dy, deviation);
                field.accumulate(x, y, weight * height_multiplier)?;
            }
        }

        field.get(cx, cy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_peak(m: f32, d: f32) -> f32 {
        m / (d * (2.0 * PI * d * d).sqrt())
    }

    #[test]
    fn test_normal_distribution_peak_and_symmetry() {
        let d = 2.0;
        assert!((normal_distribution(0.0, d, 0.0) - expected_peak(1.0, d)).abs() < 1e-6);
        assert!(
            (normal_distribution(0.0, d, 1.5) - normal_distribution(0.0, d, -1.5)).abs() < 1e-7
        );
        assert!(normal_distribution(0.0, d, 3.0) < normal_distribution(0.0, d, 1.0));
    }

    #[test]
    fn test_center_gain_matches_pdf_peak() {
        let deposit = GaussianDeposit::new(4.0);
        for &(size, m, d) in &[(40usize, 10.0f32, 2.0f32), (200, 45.0, 11.0), (30, 3.0, 0.5)] {
            let mut field = HeightField::new(size, size);
            let c = size / 2;
            let center = deposit.deposit(&mut field, c, c, m, d).unwrap();
            let expected = expected_peak(m, d);
            assert!(
                (center - expected).abs() < expected.abs() * 1e-5,
                "size {} d {}: {} vs {}",
                size,
                d,
                center,
                expected
            );
            assert!((peak_height(m, d) - expected).abs() < expected.abs() * 1e-6);
        }
    }

    #[test]
    fn test_wider_deposit_is_lower() {
        assert!(peak_height(10.0, 4.0) < peak_height(10.0, 2.0));
        // 1 / deviation^2 scaling
        let ratio = peak_height(10.0, 2.0) / peak_height(10.0, 4.0);
        assert!((ratio - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_depositing_twice_doubles_every_delta() {
        let deposit = GaussianDeposit::new(3.0);
        let mut once = HeightField::new(20, 20);
        deposit.deposit(&mut once, 10, 8, 5.0, 1.5).unwrap();

        let mut twice = HeightField::new(20, 20);
        deposit.deposit(&mut twice, 10, 8, 5.0, 1.5).unwrap();
        deposit.deposit(&mut twice, 10, 8, 5.0, 1.5).unwrap();

        for ((_, _, a), (_, _, b)) in once.iter().zip(twice.iter()) {
            assert!((b - 2.0 * a).abs() < 1e-5);
        }
    }

    #[test]
    fn test_edge_deposit_stays_in_bounds() {
        let deposit = GaussianDeposit::new(4.0);
        let mut field = HeightField::new(10, 6);
        // Radius 20 covers far more than the field from every corner
        for &(x, y) in &[(0, 0), (10, 0), (0, 6), (10, 6)] {
            deposit.deposit(&mut field, x, y, 1.0, 5.0).unwrap();
        }
        assert!(field.iter().all(|(_, _, h)| h > 0.0));
    }

    #[test]
    fn test_cells_beyond_radius_untouched() {
        let deposit = GaussianDeposit::new(2.0);
        let mut field = HeightField::new(20, 20);
        deposit.deposit(&mut field, 10, 10, 1.0, 1.0).unwrap();
        // radius = 2
        assert!(field.get(12, 10).unwrap() > 0.0);
        assert!(field.get(12, 12).unwrap() > 0.0);
        assert_eq!(field.get(13, 10).unwrap(), 0.0);
        assert_eq!(field.get(10, 7).unwrap(), 0.0);
    }

    #[test]
    fn test_negative_multiplier_carves() {
        let deposit = GaussianDeposit::new(4.0);
        let mut field = HeightField::new(20, 20);
        let center = deposit.deposit(&mut field, 5, 5, -2.0, 1.0).unwrap();
        assert!(center < 0.0);
        assert_eq!(center, field.get(5, 5).unwrap());
    }

    #[test]
    fn test_huge_deviation_clips_to_field() {
        let deposit = GaussianDeposit::new(4.0);
        assert_eq!(deposit.radius(1e19), usize::MAX);
        let mut field = HeightField::new(10, 10);
        deposit.deposit(&mut field, 10, 10, 1.0, 1e19).unwrap();
        // The saturated radius clips to the field instead of overflowing
        assert!(field.iter().all(|(_, _, h)| h >= 0.0));
        assert_eq!(field.get(10, 10).unwrap(), peak_height(1.0, 1e19));
    }

    #[test]
    fn test_center_outside_field_writes_nothing() {
        let deposit = GaussianDeposit::new(4.0);
        let mut field = HeightField::new(10, 10);
        assert!(deposit.deposit(&mut field, 11, 5, 1.0, 2.0).is_err());
        assert!(field.iter().all(|(_, _, h)| h == 0.0));
    }
}
