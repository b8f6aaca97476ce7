pub mod classify;
pub mod extract;
pub mod tokens;

use crate::error::Result;
use crate::html;
use crate::records::Report;

/// Which report family a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportKind {
    /// Four Pillars birth chart (八字).
    Bazi,
    /// Six Lines hexagram divination (六爻).
    Liuyao,
}

/// Plain text → trimmed, non-empty lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split('\n')
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Two-pass pipeline: lines → classified fields → record.
pub fn process_lines<S: AsRef<str>>(kind: ReportKind, lines: &[S]) -> Result<Report> {
    match kind {
        ReportKind::Bazi => extract::assemble_four_pillars(lines).map(Report::FourPillars),
        ReportKind::Liuyao => extract::assemble_six_lines(lines).map(Report::SixLines),
    }
}

pub fn process_text(kind: ReportKind, text: &str) -> Result<Report> {
    process_lines(kind, &split_lines(text))
}

/// Reduce the report page's HTML to lines first.
pub fn process_html(kind: ReportKind, page: &str) -> Result<Report> {
    let lines = html::reduce_html(page)?;
    process_lines(kind, &lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;

    #[test]
    fn split_lines_trims_and_drops_blanks() {
        let lines = split_lines("  命主姓名：某人 \r\n\r\n\t\n出生公历：2005年\n");
        assert_eq!(lines, vec!["命主姓名：某人", "出生公历：2005年"]);
    }

    #[test]
    fn blank_text_is_empty_document() {
        assert_eq!(process_text(ReportKind::Bazi, " \n \n"), Err(ExtractError::EmptyDocument));
    }

    #[test]
    fn dispatch_by_kind() {
        let text = "占问事宜：求财";
        assert!(matches!(process_text(ReportKind::Liuyao, text), Ok(Report::SixLines(_))));
        assert!(matches!(process_text(ReportKind::Bazi, text), Ok(Report::FourPillars(_))));
    }

    #[test]
    fn html_fixture_matches_text_fixture() {
        let page = std::fs::read_to_string("tests/fixtures/liuyao.html").unwrap();
        let text = std::fs::read_to_string("tests/fixtures/liuyao.txt").unwrap();
        assert_eq!(
            process_html(ReportKind::Liuyao, &page),
            process_text(ReportKind::Liuyao, &text)
        );
    }

    #[test]
    fn bazi_html_fixture() {
        let page = std::fs::read_to_string("tests/fixtures/bazi.html").unwrap();
        let Ok(Report::FourPillars(r)) = process_html(ReportKind::Bazi, &page) else {
            panic!("expected a four-pillars record");
        };
        assert_eq!(r.name.as_deref(), Some("某人"));
        assert_eq!(
            r.pillars.and_then(|p| p.branches),
            Some(["酉", "巳", "未", "巳"].map(String::from))
        );
    }

    #[test]
    fn html_without_div_fails() {
        assert_eq!(
            process_html(ReportKind::Bazi, "<html><body>无内容</body></html>"),
            Err(ExtractError::NoContent)
        );
    }
}
