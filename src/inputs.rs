use std::path::PathBuf;
use tracing::warn;

/// Expands each glob pattern in turn and yields every match as a work item.
///
/// Expansion is lazy, so matches can be queued while later patterns are
/// still being walked. Malformed patterns and unreadable matches are logged
/// and skipped.
pub fn expand_patterns<S>(patterns: &[S]) -> impl Iterator<Item = PathBuf> + '_
where
    S: AsRef<str>,
{
    patterns.iter().flat_map(|pattern| {
        let pattern = pattern.as_ref();
        let matches = glob::glob(pattern)
            .inspect_err(|err| warn!(pattern, "invalid glob pattern: {err}"))
            .ok();

        matches.into_iter().flatten().filter_map(|entry| {
            entry
                .inspect_err(|err| warn!("skipping unreadable match: {err}"))
                .ok()
        })
    })
}
