/// Wrap free-text notes into printable lines of at most `width` characters.
///
/// Every source line is its own paragraph. Words are packed greedily and
/// separated by single spaces; a word longer than `width` is split across
/// lines. Blank paragraphs produce no output line.
pub fn wrap_notes(notes: &str, width: usize) -> Vec<String> {
    notes
        .lines()
        .flat_map(|paragraph| wrap_paragraph(paragraph, width))
        .collect()
}

fn wrap_paragraph(paragraph: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in paragraph.split_whitespace() {
        let word_len = word.chars().count();

        if current_len > 0 && current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
            continue;
        }

        if current_len > 0 {
            lines.push(std::mem::take(&mut current));
        }

        let mut rest = word;
        while rest.chars().count() > width {
            let split = rest
                .char_indices()
                .nth(width)
                .map_or(rest.len(), |(idx, _)| idx);
            lines.push(rest[..split].to_string());
            rest = &rest[split..];
        }
        current.push_str(rest);
        current_len = rest.chars().count();
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}
