use terminal_size::{terminal_size, Height, Width};

/// Render rows as an ASCII table, fitting each line to `max_width` columns.
/// Header cells are coloured green when `color` is set.
pub fn render_table(columns: &[&str], rows: &[Vec<String>], max_width: usize, color: bool) -> String {
    let cols: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    let cell_cap = max_width.max(8);
    let mut widths: Vec<usize> = cols.iter().map(|s| visible_len(s).min(cell_cap)).collect();
    for r in rows {
        for (i, cell) in r.iter().enumerate().take(cols.len()) {
            let w = visible_len(cell);
            if w > widths[i] { widths[i] = w.min(cell_cap); }
        }
    }
    shrink_widest(&mut widths, max_width);

    let mut out = String::new();
    let sep = build_separator(&widths);
    push_line(&mut out, &sep);
    push_line(&mut out, &build_header(&cols, &widths, color));
    push_line(&mut out, &sep);
    for r in rows {
        push_line(&mut out, &build_row(r, &widths));
    }
    push_line(&mut out, &sep);
    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

// Each column costs its width plus 3 chars of framing ("| " .. " "), plus the closing '|'.
fn shrink_widest(widths: &mut [usize], max_width: usize) {
    let framing = widths.len() * 3 + 1;
    loop {
        let total: usize = widths.iter().sum::<usize>() + framing;
        if total <= max_width { return; }
        let (idx, widest) = match widths.iter().enumerate().max_by_key(|(_, w)| **w) {
            Some((i, w)) => (i, *w),
            None => return,
        };
        if widest <= 4 { return; }
        widths[idx] = widest - 1;
    }
}

fn build_separator(widths: &[usize]) -> String {
    let mut s = String::new();
    s.push('+');
    for w in widths {
        s.push_str(&"-".repeat(*w + 2));
        s.push('+');
    }
    s
}

fn build_row(cells: &[String], widths: &[usize]) -> String {
    let mut s = String::new();
    s.push('|');
    for (i, w) in widths.iter().enumerate() {
        let cell = cells.get(i).cloned().unwrap_or_default();
        let (text, align_right) = (truncate(&cell, *w), is_numeric_like(&cell));
        let pad = w.saturating_sub(visible_len(&text));
        s.push(' ');
        if align_right {
            s.push_str(&" ".repeat(pad));
            s.push_str(&text);
        } else {
            s.push_str(&text);
            s.push_str(&" ".repeat(pad));
        }
        s.push(' ');
        s.push('|');
    }
    s
}

fn build_header(cells: &[String], widths: &[usize], color: bool) -> String {
    let mut s = String::new();
    s.push('|');
    for (i, w) in widths.iter().enumerate() {
        let cell = cells.get(i).cloned().unwrap_or_default();
        let text = truncate(&cell, *w);
        let pad = w.saturating_sub(visible_len(&text));
        s.push(' ');
        if color {
            s.push_str(&format!("\x1b[32m{}\x1b[0m", text));
        } else {
            s.push_str(&text);
        }
        s.push_str(&" ".repeat(pad));
        s.push(' ');
        s.push('|');
    }
    s
}

pub fn truncate(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max { return s.to_string(); }
    if max <= 1 { return "…".to_string(); }
    let take = max - 1;
    s.chars().take(take).collect::<String>() + "…"
}

fn is_numeric_like(s: &str) -> bool {
    // crude detection for aligning numbers to the right; prices carry a '$'
    let st = s.trim().trim_start_matches('$').trim_end_matches('%');
    if st.is_empty() { return false; }
    let mut has_digit = false;
    for ch in st.chars() {
        if ch.is_ascii_digit() { has_digit = true; continue; }
        if ".-+,_".contains(ch) { continue; }
        return false;
    }
    has_digit
}

pub fn terminal_width() -> usize {
    match terminal_size() {
        Some((Width(w), Height(_h))) => (w as usize).saturating_sub(4).max(40),
        None => 100,
    }
}

/// Visible characters, skipping ANSI CSI escape sequences.
pub fn visible_len(s: &str) -> usize {
    let mut count = 0;
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            if chars.next() == Some('[') {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() { break; }
                }
            }
            continue;
        }
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_frame_and_aligned_numbers() {
        let rows = vec![
            vec!["1".to_string(), "Mascara".to_string(), "$9.99".to_string()],
            vec!["12".to_string(), "Eyeshadow Palette".to_string(), "$19.99".to_string()],
        ];
        let out = render_table(&["ID", "Title", "Price"], &rows, 120, false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], lines[2]);
        assert!(lines[3].starts_with("|  1 | Mascara "));
        assert!(lines[3].ends_with("|  $9.99 |"));
        assert!(lines.iter().all(|l| visible_len(l) == visible_len(lines[0])));
    }

    #[test]
    fn narrow_width_truncates_widest_column() {
        let rows = vec![vec!["1".to_string(), "An extremely long product title that will not fit".to_string()]];
        let out = render_table(&["ID", "Title"], &rows, 30, false);
        for line in out.lines() {
            assert!(visible_len(line) <= 30, "{}", line);
        }
        assert!(out.contains('…'));
    }

    #[test]
    fn colored_header_keeps_visible_width() {
        let rows = vec![vec!["x".to_string()]];
        let out = render_table(&["Name"], &rows, 80, true);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].contains("\x1b[32m"));
        assert_eq!(visible_len(lines[1]), visible_len(lines[0]));
    }

    #[test]
    fn truncate_marks_elision() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
        assert_eq!(truncate("abc", 1), "…");
    }
}
