pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

/// Checks whether a band of `child_height` fits between `cursor_y` and
/// `limit_y`.
pub fn check_child_fit(cursor_y: f32, child_height: f32, limit_y: f32, epsilon: f32) -> BreakAnalysis {
    let available = (limit_y - cursor_y).max(0.0);
    BreakAnalysis {
        should_break: child_height > available + epsilon,
        remaining_height: available,
    }
}

/// Number of leading rows that fit into `space`. When every row fits, the
/// `trailing` height that follows the last row has to fit as well.
pub fn fit_rows(rows: &[f32], space: f32, trailing: f32, epsilon: f32) -> usize {
    let mut used = 0.0;
    let mut count = 0;
    for height in rows {
        if used + height > space + epsilon {
            break;
        }
        used += height;
        count += 1;
    }
    if count == rows.len() && count > 0 && used + trailing > space + epsilon {
        count -= 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_with_epsilon() {
        assert!(!check_child_fit(90.0, 10.005, 100.0, 0.01).should_break);
        assert!(check_child_fit(90.0, 10.5, 100.0, 0.01).should_break);
        assert_eq!(check_child_fit(120.0, 1.0, 100.0, 0.01).remaining_height, 0.0);
    }

    #[test]
    fn test_fit_rows() {
        let rows = [10.0, 10.0, 10.0];
        assert_eq!(fit_rows(&rows, 25.0, 0.0, 0.01), 2);
        assert_eq!(fit_rows(&rows, 30.0, 0.0, 0.01), 3);
        assert_eq!(fit_rows(&rows, 30.0, 5.0, 0.01), 2);
        assert_eq!(fit_rows(&rows, 5.0, 0.0, 0.01), 0);
        assert_eq!(fit_rows(&[], 5.0, 0.0, 0.01), 0);
    }
}
