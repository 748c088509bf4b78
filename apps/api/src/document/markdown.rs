//! Output spacing rules: tight bullet lists, a blank line before every
//! header, no runs of blank lines.

/// Most validation errors reported back to the caller.
pub const MAX_MARKDOWN_ERRORS: usize = 25;

fn is_header(line: &str) -> bool {
    line.starts_with('#')
}

fn is_bullet(line: &str) -> bool {
    line.starts_with("- ")
}

pub fn normalize_markdown_spacing(md: &str) -> String {
    let lines: Vec<&str> = md.lines().collect();

    // Pass 1: drop blank lines that sit between two bullets.
    let mut tight: Vec<&str> = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        tight.push(lines[i]);
        i += 1;
        if !is_bullet(lines[i - 1]) {
            continue;
        }
        let next = lines[i..]
            .iter()
            .position(|l| !l.is_empty())
            .map(|offset| i + offset);
        if let Some(k) = next {
            if is_bullet(lines[k]) {
                i = k;
            }
        }
    }

    // Pass 2: blank line before headers, collapse blank runs.
    let mut out: Vec<&str> = Vec::with_capacity(tight.len());
    for line in tight {
        if is_header(line) && out.last().is_some_and(|prev| !prev.is_empty()) {
            out.push("");
        }
        if line.is_empty() && out.last().is_some_and(|prev| prev.is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }

    let mut text = out.join("\n").trim_end().to_string();
    text.push('\n');
    text
}

/// Reports bullets directly followed by a header and consecutive blank
/// lines. Line numbers are 1-based.
pub fn validate_markdown(md: &str) -> Vec<String> {
    let lines: Vec<&str> = md.lines().collect();
    let mut errors = Vec::new();
    for (i, pair) in lines.windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        if is_bullet(a) && is_header(b) {
            errors.push(format!(
                "Line {}: bullet immediately followed by header: {a:?} -> {b:?}",
                i + 1
            ));
        }
        if a.is_empty() && b.is_empty() {
            errors.push(format!("Line {}: multiple consecutive blank lines", i + 1));
        }
    }
    errors
}
