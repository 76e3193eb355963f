/// Margin of the confidence interval for a given number of independent signals.
pub fn confidence_margin(data_points: u32) -> u32 {
    match data_points {
        0..=5 => 10,
        6..=10 => 7,
        _ => 5,
    }
}

/// `[score − margin, score + margin]` clamped to [0, 100].
pub fn confidence_interval(score: u32, data_points: u32) -> [u32; 2] {
    let margin = confidence_margin(data_points);
    [score.saturating_sub(margin), (score + margin).min(100)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_bands() {
        assert_eq!(confidence_margin(0), 10);
        assert_eq!(confidence_margin(5), 10);
        assert_eq!(confidence_margin(6), 7);
        assert_eq!(confidence_margin(10), 7);
        assert_eq!(confidence_margin(11), 5);
    }

    #[test]
    fn test_five_data_points_use_widest_margin() {
        // 2 matched skills + 3 sections
        assert_eq!(confidence_interval(72, 2 + 3), [62, 82]);
    }

    #[test]
    fn test_interval_is_clamped() {
        assert_eq!(confidence_interval(4, 0), [0, 14]);
        assert_eq!(confidence_interval(97, 20), [92, 100]);
        assert_eq!(confidence_interval(100, 0), [90, 100]);
    }
}
