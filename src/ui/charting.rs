/// X (game number) and Y (percent) bounds for the accuracy chart
pub fn compute_chart_params(points: &[(f64, f64)]) -> (f64, f64) {
    let games = points.last().map_or(1.0, |p| p.0).max(1.0);
    let highest = points.iter().map(|p| p.1).fold(0.0, f64::max);
    // leave headroom so a 100% run is not drawn on the border
    let ceiling = ((highest / 10.0).ceil() * 10.0).clamp(10.0, 100.0);
    (games, ceiling)
}

/// Accuracy of each logged game, as chart points starting at game 1.
pub fn accuracy_points(accuracies: impl IntoIterator<Item = u32>) -> Vec<(f64, f64)> {
    accuracies
        .into_iter()
        .enumerate()
        .map(|(i, acc)| ((i + 1) as f64, acc as f64))
        .collect()
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
