//! Console rendering of character records.

use std::fmt::Write as _;

use crate::record::Character;

/// Placeholder shown for an empty field.
const EMPTY: &str = "-";

/// Render records as a fixed-width table with a trailing count line.
#[must_use]
pub fn render_table(records: &[Character], name_width: usize) -> String {
    let rule = "─".repeat(name_width + 42);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<5} {:<name_width$} {:<12} {:<12} {:<10}",
        "ID", "NAME", "GENDER", "STATUS", "SPECIES"
    );
    let _ = writeln!(out, "{rule}");
    for c in records {
        let _ = writeln!(
            out,
            "{:<5} {:<name_width$} {:<12} {:<12} {:<10}",
            c.id,
            truncate(&c.name, name_width.saturating_sub(1)),
            c.gender.name(),
            c.status,
            c.species
        );
    }
    let _ = writeln!(out, "{rule}");
    let _ = write!(out, "Total: {} characters", records.len());
    out
}

/// Render records one per line as `id  name  (GENDER, status)`.
#[must_use]
pub fn render_plain(records: &[Character]) -> String {
    records
        .iter()
        .map(|c| format!("{}\t{}\t({}, {})", c.id, c.name, c.gender, or_empty(&c.status)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render every field of one record.
#[must_use]
pub fn render_details(c: &Character) -> String {
    let rows = [
        ("ID", c.id.to_string()),
        ("Name", c.name.clone()),
        ("Gender", c.gender.name().to_string()),
        ("Status", c.status.clone()),
        ("Species", c.species.clone()),
        ("Type", c.kind.clone()),
        ("Origin", c.origin_name.clone()),
        ("Location", c.location_name.clone()),
        ("Created", c.created.clone()),
    ];

    rows.iter()
        .map(|(label, value)| format!("  {label:<9}: {}", or_empty(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn or_empty(value: &str) -> &str {
    if value.trim().is_empty() {
        EMPTY
    } else {
        value
    }
}

/// Shorten `s` to at most `max` characters, marking the cut with `…`.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Gender, NewCharacter};

    fn character(id: u32, name: &str) -> Character {
        let new = NewCharacter {
            name: name.to_string(),
            status: "Alive".to_string(),
            species: "Human".to_string(),
            gender: Gender::Female,
            ..NewCharacter::default()
        };
        Character::from_new(id, new, String::new())
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Rick", 10), "Rick");
        assert_eq!(truncate("Abradolf Lincler", 8), "Abradol…");
        assert_eq!(truncate("Abradolf Lincler", 8).chars().count(), 8);
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&[character(1, "Beth Smith"), character(12, "Tammy")], 30);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("ID    NAME"));
        assert!(lines[2].starts_with("1     Beth Smith"));
        assert!(lines[2].contains("FEMALE"));
        assert!(lines[3].starts_with("12    Tammy"));
        assert_eq!(lines.last().unwrap(), &"Total: 2 characters");
    }

    #[test]
    fn test_render_table_truncates_long_names() {
        let long = "Mr. Poopybutthole the Third of Many";
        let table = render_table(&[character(1, long)], 10);
        assert!(table.contains("Mr. Poop…"));
        assert!(!table.contains(long));
    }

    #[test]
    fn test_render_plain() {
        let text = render_plain(&[character(1, "Beth"), character(2, "Summer")]);
        assert_eq!(text, "1\tBeth\t(FEMALE, Alive)\n2\tSummer\t(FEMALE, Alive)");
    }

    #[test]
    fn test_render_details_marks_empty_fields() {
        let text = render_details(&character(4, "Beth"));
        assert!(text.contains("  Name     : Beth"));
        assert!(text.contains("  Type     : -"));
        assert!(text.contains("  Created  : -"));
    }
}
