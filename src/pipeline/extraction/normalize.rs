/// Normalize OCR or PDF text so catalogue patterns see plain, predictable
/// input.
///
/// Control characters are dropped, typographic variants that show up in lab
/// reports are folded to the spellings the unit patterns expect, horizontal
/// whitespace runs collapse to one space, and blank lines disappear.
pub fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for line in raw.lines() {
        let line = normalize_line(line);
        if line.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&line);
    }
    out
}

fn normalize_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut pending_space = false;

    for c in line.chars().filter_map(fold_char) {
        if c == ' ' {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }
    out
}

/// `None` drops the character.
fn fold_char(c: char) -> Option<char> {
    match c {
        '\t' | '\u{00A0}' | '\u{2007}' | '\u{202F}' => Some(' '),
        // Greek small mu → micro sign
        '\u{03BC}' => Some('µ'),
        '\u{2010}'..='\u{2015}' | '\u{2212}' => Some('-'),
        '\u{FF1A}' => Some(':'),
        '\u{FF0F}' => Some('/'),
        '\u{00D7}' => Some('x'),
        '\u{FEFF}' | '\u{200B}' => None,
        c if c.is_whitespace() => Some(' '),
        c if c.is_control() => None,
        c => Some(c),
    }
}
