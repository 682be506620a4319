/// Ordinary least-squares line through `(xs, ys)`; `(slope, intercept)`.
/// `None` if there are fewer than two points or all `xs` coincide.
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Option<(f64, f64)> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let mean_x = xs[..n].iter().sum::<f64>() / nf;
    let mean_y = ys[..n].iter().sum::<f64>() / nf;
    let (mut sxy, mut sxx) = (0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        sxy += dx * (y - mean_y);
        sxx += dx * dx;
    }
    if sxx == 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    Some((slope, mean_y - slope * mean_x))
}

/// Sort end-of-line labels by height and push each one up until it sits at
/// least `min_spacing` above the previous. Returns `(adjusted_y, tag)`.
pub fn spread_labels<T>(mut labels: Vec<(f64, T)>, min_spacing: f64) -> Vec<(f64, T)> {
    labels.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut prev: Option<f64> = None;
    for (y, _) in labels.iter_mut() {
        if let Some(p) = prev {
            if *y - p < min_spacing {
                *y = p + min_spacing;
            }
        }
        prev = Some(*y);
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_recovers_exact_line() {
        let xs = [0.87, 2.27, 3.96, 5.10];
        let ys: Vec<f64> = xs.iter().map(|x| -0.4 * x + 2.5).collect();
        let (slope, intercept) = linear_fit(&xs, &ys).unwrap();
        assert!((slope + 0.4).abs() < 1e-12);
        assert!((intercept - 2.5).abs() < 1e-12);
    }

    #[test]
    fn fit_of_noisy_points_matches_hand_computation() {
        // x = 0,1,2 ; y = 1,2,4  ->  slope 1.5, intercept 5/6
        let (slope, intercept) = linear_fit(&[0.0, 1.0, 2.0], &[1.0, 2.0, 4.0]).unwrap();
        assert!((slope - 1.5).abs() < 1e-12);
        assert!((intercept - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_fits_are_none() {
        assert_eq!(linear_fit(&[1.0], &[2.0]), None);
        assert_eq!(linear_fit(&[1.0, 1.0], &[2.0, 3.0]), None);
    }

    #[test]
    fn labels_keep_minimum_spacing() {
        let out = spread_labels(vec![(1.0, 'b'), (0.9, 'a'), (1.05, 'c'), (3.0, 'd')], 0.25);
        let tags: Vec<char> = out.iter().map(|(_, t)| *t).collect();
        assert_eq!(tags, vec!['a', 'b', 'c', 'd']);
        let ys: Vec<f64> = out.iter().map(|(y, _)| *y).collect();
        assert!((ys[0] - 0.9).abs() < 1e-12);
        assert!((ys[1] - 1.15).abs() < 1e-12);
        assert!((ys[2] - 1.40).abs() < 1e-12);
        assert_eq!(ys[3], 3.0);
    }
}
