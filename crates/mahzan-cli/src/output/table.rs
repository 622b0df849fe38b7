/// Render a simple aligned table for string rows.
///
/// Column widths come from content, clamped so the whole table fits
/// `max_width` when one is known. Over-wide cells are truncated with an
/// ellipsis.
#[must_use]
pub fn render(headers: &[&str], rows: &[Vec<String>], max_width: Option<usize>) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
                .max(4)
        })
        .collect();

    shrink_to_fit(&mut widths, headers, max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| pad(&truncate(header, *width), *width))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = row.get(index).map_or("-", String::as_str);
                pad(&truncate(cell, *width), *width)
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line);
    }
    lines.join("\n")
}

fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else { return };
    if widths.is_empty() {
        return;
    }

    let separators = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + separators > max_width {
        // Shave the widest column that still has slack.
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].len().max(4))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = candidate else { break };
        widths[index] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize) -> String {
    let gap = width.saturating_sub(value.chars().count());
    format!("{value}{}", " ".repeat(gap))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::render;

    #[test]
    fn aligns_columns_and_fills_missing_cells() {
        let rendered = render(
            &["id", "title"],
            &[
                vec!["iss-1".to_string(), "September".to_string()],
                vec!["iss-22".to_string()],
            ],
            None,
        );

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id"));
        assert!(lines[2].contains("September"));
        assert!(lines[3].contains('-'));
    }

    #[test]
    fn truncates_when_width_is_constrained() {
        let rendered = render(
            &["title"],
            &[vec!["a very long magazine issue title".to_string()]],
            Some(12),
        );

        assert!(rendered.lines().all(|line| line.chars().count() <= 12));
        assert!(rendered.contains('…'));
    }
}
