/// Horizontal targets for a row of words anchored on its newest entry.
///
/// The last width is centered on the stage (`W/2 - w/2`); every earlier word is stacked
/// immediately to the left of its successor, `gap_px` apart. An over-wide word is allowed
/// to start at a negative x.
pub fn focal_row_targets(stage_width: f64, widths: &[f64], gap_px: f64) -> Vec<f64> {
    let mut targets = vec![0.0; widths.len()];
    let Some(&focal_w) = widths.last() else {
        return targets;
    };

    let last = widths.len() - 1;
    targets[last] = stage_width * 0.5 - focal_w * 0.5;

    let mut right_edge = targets[last] - gap_px;
    for idx in (0..last).rev() {
        targets[idx] = right_edge - widths[idx];
        right_edge = targets[idx] - gap_px;
    }
    targets
}

/// Total span of the row including gaps.
pub fn row_extent(widths: &[f64], gap_px: f64) -> f64 {
    widths.iter().sum::<f64>() + (widths.len().saturating_sub(1) as f64) * gap_px
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
