use strsim::levenshtein;

/// Smallest edit distance between `query` and the whole of `name` or any single word of it.
/// Case-insensitive, so "mesi" is 1 away from "Lionel Messi".
pub fn name_distance(query: &str, name: &str) -> usize {
    let query = query.to_lowercase();
    let name = name.to_lowercase();

    name.split_whitespace()
        .map(|part| levenshtein(&query, part))
        .chain(std::iter::once(levenshtein(&query, &name)))
        .min()
        .unwrap_or(query.len())
}

/// Amount in millions from values such as `"45M"`, `"€1.5m"`, `"800K"` or `"1.2B"`.
pub fn parse_market_value(raw: &str) -> Option<f64> {
    let trimmed = raw
        .trim()
        .trim_start_matches(['€', '$', '£'])
        .trim();
    let number = trimmed.trim_end_matches(|c: char| c.is_alphabetic()).trim();
    let unit = trimmed[number.len()..].trim().to_lowercase();

    let value: f64 = number.parse().ok()?;
    match unit.as_str() {
        "" | "m" | "mn" => Some(value),
        "k" => Some(value / 1000.0),
        "b" | "bn" => Some(value * 1000.0),
        _ => None,
    }
}

pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
