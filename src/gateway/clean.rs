// Response text cleaning

/// Strip markdown code fences from a model response.
///
/// Removes a leading fence line (with optional language tag) and a trailing
/// fence line, then trims surrounding whitespace. Applied until the text
/// stops changing, so cleaning is idempotent for any input.
pub fn clean_script_text(text: &str) -> String {
    let mut current = text.trim().to_string();
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(text: &str) -> String {
    let mut lines: Vec<&str> = text.lines().collect();

    if let Some(first) = lines.first() {
        if is_fence_line(first) {
            lines.remove(0);
        }
    }
    if let Some(last) = lines.last() {
        if last.trim() == "```" {
            lines.pop();
        }
    }

    lines.join("\n").trim().to_string()
}

fn is_fence_line(line: &str) -> bool {
    let line = line.trim();
    line.starts_with("```") && !line[3..].contains(char::is_whitespace)
}
