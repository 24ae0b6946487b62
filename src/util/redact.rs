/// Keeps the first and last four characters of a credential for log output.
///
/// Values too short to hide anything are replaced entirely.
pub(crate) fn redact_value(value: &str) -> String {
    const KEEP: usize = 4;

    let chars = value.trim().chars().collect::<Vec<_>>();
    if chars.len() <= KEEP * 2 {
        return "<redacted>".to_string();
    }

    let head = chars[..KEEP].iter().collect::<String>();
    let tail = chars[chars.len() - KEEP..].iter().collect::<String>();
    format!("{head}...{tail}")
}
