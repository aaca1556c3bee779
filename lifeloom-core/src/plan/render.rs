//! Rendering parsed plans back to text

use std::fmt::Write;

use super::parser::WeekRecord;

/// Render weeks in the markdown convention the parser reads
///
/// For plans whose titles start with `Week <n>`, parsing the output yields
/// the same weeks again.
pub fn render_markdown(plan: &[WeekRecord]) -> String {
    let mut out = String::new();

    for (i, week) in plan.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "## {}", week.title);
        for task in &week.tasks {
            let _ = writeln!(out, "- {}", task);
        }
    }

    out
}

/// Render weeks for terminal display
pub fn render_text(plan: &[WeekRecord]) -> String {
    let mut out = String::new();

    for (i, week) in plan.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", week.title);
        for task in &week.tasks {
            let _ = writeln!(out, "  - {}", task);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::parse_plan;

    fn sample() -> Vec<WeekRecord> {
        vec![
            WeekRecord::new("Week 1: Title", vec!["a".to_string(), "b".to_string()]),
            WeekRecord::new("Week 2", vec!["c".to_string()]),
        ]
    }

    #[test]
    fn test_render_markdown() {
        assert_eq!(
            render_markdown(&sample()),
            "## Week 1: Title\n- a\n- b\n\n## Week 2\n- c\n"
        );
    }

    #[test]
    fn test_render_text() {
        assert_eq!(
            render_text(&sample()),
            "Week 1: Title\n  - a\n  - b\n\nWeek 2\n  - c\n"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_markdown(&[]), "");
        assert_eq!(render_text(&[]), "");
    }

    #[test]
    fn test_round_trip_is_stable() {
        let source = "Intro text\n\
                      ## Week 1: Foundations\n\
                      * Pick a course\n\
                      1. Book a tutor\n\
                      Stray prose line\n\
                      ## Week 2 Practice\n\
                      + - dash inside task\n\
                      - #hashtag goals\n\
                      ## Week 3\n";
        let first = parse_plan(source);
        assert_eq!(first.len(), 2);

        let second = parse_plan(&render_markdown(&first));
        assert_eq!(first, second);

        let third = parse_plan(&render_markdown(&second));
        assert_eq!(second, third);
    }
}
