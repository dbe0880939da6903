//! Concurrency, retry, and artifact policy
//!
//! Pure functions of (environment flag, counts) so the tradeoffs stay
//! testable in isolation. Local runs keep half the machine free for the
//! developer; unattended runs use everything and retry failures.

/// Worker count for the suite.
///
/// Local development uses half of the available parallel-execution units
/// (rounded down, minimum 1) to preserve interactive responsiveness;
/// unattended mode uses all of them.
pub fn worker_count(is_ci: bool, units: usize) -> usize {
    if is_ci {
        units.max(1)
    } else {
        (units / 2).max(1)
    }
}

/// Automatic retries applied to a failed scenario (never the whole suite).
pub fn retry_limit(is_ci: bool) -> u32 {
    if is_ci {
        2
    } else {
        0
    }
}

/// Whether an attempt records a full execution trace. Only the first retry
/// does: the original attempt stays cheap and later retries add no new
/// information, which bounds artifact volume while still capturing failure
/// context.
pub fn trace_on_attempt(attempt: u32) -> bool {
    attempt == 1
}

/// Whether to capture a still image after an attempt: only on terminal
/// failure.
pub fn screenshot_on(failed: bool, attempt: u32, retries: u32) -> bool {
    failed && attempt == retries
}

/// Whether an attempt's video recording is retained: only when the
/// scenario has ultimately failed.
pub fn retain_video(failed: bool, attempt: u32, retries: u32) -> bool {
    failed && attempt == retries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_mode_uses_half_the_units() {
        assert_eq!(worker_count(false, 8), 4);
        assert_eq!(worker_count(false, 7), 3);
        assert_eq!(worker_count(false, 1), 1);
        assert_eq!(worker_count(false, 0), 1);
    }

    #[test]
    fn ci_mode_uses_all_units() {
        assert_eq!(worker_count(true, 2), 2);
        assert_eq!(worker_count(true, 16), 16);
        assert_eq!(worker_count(true, 0), 1);
    }

    #[test]
    fn retries_only_in_ci() {
        assert_eq!(retry_limit(false), 0);
        assert_eq!(retry_limit(true), 2);
    }

    #[test]
    fn trace_only_on_first_retry() {
        assert!(!trace_on_attempt(0));
        assert!(trace_on_attempt(1));
        assert!(!trace_on_attempt(2));
    }

    #[test]
    fn screenshot_only_on_terminal_failure() {
        assert!(!screenshot_on(false, 2, 2));
        assert!(!screenshot_on(true, 1, 2));
        assert!(screenshot_on(true, 2, 2));
        assert!(screenshot_on(true, 0, 0));
    }

    #[test]
    fn video_retained_only_for_failing_scenarios() {
        assert!(!retain_video(false, 0, 2));
        assert!(!retain_video(true, 0, 2));
        assert!(retain_video(true, 2, 2));
    }
}
