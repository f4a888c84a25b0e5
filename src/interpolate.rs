//! Named placeholder substitution for translated messages.
//!
//! Message catalogs carry templates such as `"Hello {name}"`. The values
//! are supplied at call time, after translation, so translators can move
//! placeholders around freely.

/// Replaces `{name}` placeholders in `template` with their values.
///
/// Substitution is a single left-to-right pass. A placeholder with no
/// matching entry in `values` is kept verbatim, and a `{` that never
/// closes is treated as literal text, so a stale template still renders
/// legibly instead of failing.
///
/// When `values` lists the same name twice, the first entry wins.
///
/// # Example
///
/// ```
/// use taal::interpolate;
///
/// let text = interpolate("{greeting}, {name}!", &[("greeting", "Hallo"), ("name", "Jan")]);
/// assert_eq!(text, "Hallo, Jan!");
/// ```
pub fn interpolate(template: &str, values: &[(&str, &str)]) -> String {
	let mut out = String::with_capacity(template.len());
	let mut rest = template;

	while let Some(open) = rest.find('{') {
		out.push_str(&rest[..open]);
		let after = &rest[open + 1..];
		match after.find('}') {
			Some(close) => {
				let name = &after[..close];
				match values.iter().find(|(key, _)| *key == name) {
					Some((_, value)) => out.push_str(value),
					None => {
						out.push('{');
						out.push_str(name);
						out.push('}');
					}
				}
				rest = &after[close + 1..];
			}
			None => {
				// No closing brace left; the tail is literal text.
				out.push_str(&rest[open..]);
				return out;
			}
		}
	}

	out.push_str(rest);
	out
}
