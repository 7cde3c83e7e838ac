//! Elastic ASCII table output for the summary and preview commands.

use std::borrow::Cow;

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| cell_width(h)).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(widths.len()) {
            widths[idx] = widths[idx].max(cell_width(cell));
        }
    }

    let mut output = String::new();
    output.push_str(&format_row(headers, &widths));
    output.push('\n');
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat((*w).max(1))).collect();
    output.push_str(&format_row(&separator, &widths));
    output.push('\n');
    for row in rows {
        output.push_str(&format_row(row, &widths));
        output.push('\n');
    }
    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (idx, value) in values.iter().enumerate().take(widths.len()) {
        if idx > 0 {
            line.push_str("  ");
        }
        let sanitized = sanitize_cell(value);
        line.push_str(sanitized.as_ref());
        let padding = widths[idx].saturating_sub(cell_width(sanitized.as_ref()));
        line.push_str(&" ".repeat(padding));
    }
    line.truncate(line.trim_end().len());
    line
}

fn cell_width(value: &str) -> usize {
    value.chars().count()
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_padded_to_the_widest_cell() {
        let headers = vec!["bucket".to_string(), "rows".to_string()];
        let rows = vec![
            vec!["Monday".to_string(), "12".to_string()],
            vec!["Unassigned".to_string(), "3".to_string()],
        ];
        let rendered = render_table(&headers, &rows);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "bucket      rows");
        assert_eq!(lines[1], "----------  ----");
        assert_eq!(lines[2], "Monday      12");
        assert_eq!(lines[3], "Unassigned  3");
    }

    #[test]
    fn control_whitespace_is_flattened() {
        let headers = vec!["a".to_string()];
        let rows = vec![vec!["x\ny".to_string()]];
        let rendered = render_table(&headers, &rows);
        assert!(rendered.contains("x y"));
    }
}
