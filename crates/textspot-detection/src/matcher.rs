/// Check whether any detected fragment is the target text.
///
/// Comparison is whole-fragment equality after lowercasing both sides, so
/// `"STEVE"` matches `"steve"` but `"steve!"` and `"steve jobs"` do not.
pub fn matches_target<S: AsRef<str>>(fragments: &[S], target: &str) -> bool {
    let target = target.to_lowercase();
    fragments
        .iter()
        .any(|fragment| fragment.as_ref().to_lowercase() == target)
}
