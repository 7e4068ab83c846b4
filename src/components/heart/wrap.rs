//! Greedy word wrapping against a caller-supplied width measure.

/// Breaks `text` into lines no wider than `max_width` where possible.
///
/// Words are split on single spaces and packed greedily. A word that is wider
/// than `max_width` on its own still gets its own line; words are never split.
pub fn wrap<F>(text: &str, measure: F, max_width: f64) -> Vec<String>
where
	F: Fn(&str) -> f64,
{
	let mut words = text.split(' ');
	let mut lines = Vec::new();
	let mut current = words.next().unwrap_or_default().to_string();

	for word in words {
		let candidate = format!("{current} {word}");
		if measure(&candidate) > max_width && !current.is_empty() {
			lines.push(std::mem::replace(&mut current, word.to_string()));
		} else {
			current = candidate;
		}
	}
	lines.push(current);
	lines
}
