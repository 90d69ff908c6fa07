//! Periodic boundary helpers for a square box of side `L`

use glam::DVec2;

/// Minimum-image displacement along one axis
///
/// Assumes `|d| <= L`, which holds for any two coordinates inside the box.
pub fn minimum_image(d: f64, box_length: f64) -> f64 {
    let half = 0.5 * box_length;
    if d > half {
        d - box_length
    } else if d < -half {
        d + box_length
    } else {
        d
    }
}

/// Minimum-image displacement applied independently to both axes
pub fn minimum_image_vec(d: DVec2, box_length: f64) -> DVec2 {
    DVec2::new(
        minimum_image(d.x, box_length),
        minimum_image(d.y, box_length),
    )
}

/// Move a coordinate back into `[0, L)` by at most one box length
///
/// Returns `None` if the coordinate is still outside the box after one
/// relocation.
pub fn wrap(x: f64, box_length: f64) -> Option<f64> {
    let wrapped = if x < 0.0 {
        let shifted = x + box_length;
        // -1e-18 + L rounds to exactly L
        if shifted == box_length {
            0.0
        } else {
            shifted
        }
    } else if x >= box_length {
        x - box_length
    } else {
        x
    };

    (0.0..box_length).contains(&wrapped).then_some(wrapped)
}
