// src/classification/xyz.rs

use crate::classification::monthly::SeriesStats;
use crate::model::XyzClass;

/// Coefficient of variation, if it is defined.
///
/// Undefined for a zero mean or when no sample std exists (< 2 months).
pub fn coefficient_of_variation(stats: &SeriesStats) -> Option<f64> {
    let std = stats.std?;
    if stats.mean == 0.0 {
        return None;
    }
    let cv = std / stats.mean;
    cv.is_finite().then_some(cv)
}

/// Bands a CV against `(x_max, y_max)`.
///
/// An undefined CV is Z.
pub fn xyz_class_for(cv: Option<f64>, cuts: (f64, f64)) -> XyzClass {
    let (x_max, y_max) = cuts;
    match cv {
        Some(cv) if cv <= x_max => XyzClass::X,
        Some(cv) if cv <= y_max => XyzClass::Y,
        _ => XyzClass::Z,
    }
}

pub fn classify_xyz(stats: &SeriesStats, cuts: (f64, f64)) -> XyzClass {
    xyz_class_for(coefficient_of_variation(stats), cuts)
}
