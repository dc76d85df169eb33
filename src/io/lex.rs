//! Lexical helpers shared by the Wavefront mesh and material grammars.
//!
//! Both formats are line oriented: a keyword, whitespace-separated
//! arguments, and an optional `#` comment running to the end of the line.

/// Strip the comment from a line and split off its keyword.
pub(crate) fn split_line(line: &str) -> Option<(&str, &str)> {
    let content = match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    };
    let content = content.trim();
    if content.is_empty() {
        return None;
    }
    Some(match content.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (content, ""),
    })
}

/// Parse a fixed number of floats, allowing up to `optional` trailing extras.
pub(crate) fn floats<const N: usize>(
    args: &str,
    optional: usize,
    what: &str,
) -> Result<[f32; N], String> {
    let values = args
        .split_whitespace()
        .map(|s| {
            s.parse::<f32>()
                .map_err(|_| format!("invalid number `{}` in {}", s, what))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if values.len() < N || values.len() > N + optional {
        return Err(format!(
            "{} expects {} values, found {}",
            what,
            N,
            values.len()
        ));
    }
    let mut out = [0.0; N];
    out.copy_from_slice(&values[..N]);
    Ok(out)
}
