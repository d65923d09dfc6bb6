//! Shared helpers for in-crate tests.

/// Case count for property tests: `PROPTEST_CASES` wins, CI runs the full
/// `default`, local runs stay short.
pub fn proptest_cases(default: u32) -> u32 {
    let from_env = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|value| value.parse::<u32>().ok());
    match from_env {
        Some(value) => value.max(1),
        None if std::env::var_os("CI").is_some() => default.max(1),
        None => default.clamp(1, 16),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proptest_cases_is_never_zero() {
        assert!(proptest_cases(0) >= 1);
        assert!(proptest_cases(1000) >= 1);
    }
}
