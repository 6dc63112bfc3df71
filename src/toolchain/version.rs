//! Numeric version comparison for tool gates.

/// Check whether dotted version `found` is at least `required`.
///
/// Comparison is numeric per component, never lexical: "0.10.0" is newer
/// than "0.9.0". Missing components count as zero, so "1.2" and "1.2.0"
/// compare equal. Non-numeric components also count as zero.
pub fn version_at_least(found: &str, required: &str) -> bool {
    let parse = |v: &str| -> Vec<u64> {
        v.split('.')
            .map(|part| part.trim().parse().unwrap_or(0))
            .collect()
    };

    let found_parts = parse(found);
    let required_parts = parse(required);

    let len = found_parts.len().max(required_parts.len());
    for i in 0..len {
        let f = found_parts.get(i).copied().unwrap_or(0);
        let r = required_parts.get(i).copied().unwrap_or(0);
        if f > r {
            return true;
        }
        if f < r {
            return false;
        }
    }

    true
}
