use scraper::{ElementRef, Html, Node, Selector};

use crate::error::{ExtractError, Result};

/// Report page HTML → the trimmed, non-empty text lines of its first `<div>`.
pub fn reduce_html(page: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(page);
    let selector = Selector::parse("div").map_err(|e| ExtractError::Internal(format!("{e:?}")))?;
    let content = document.select(&selector).next().ok_or(ExtractError::NoContent)?;
    Ok(crate::parser::split_lines(&element_text(content)))
}

/// Text of an element in document order, with `<br>` as a line break and
/// non-breaking spaces as plain spaces.
fn element_text(element: ElementRef) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(t) => text.extend(t.chars().map(|c| if c == '\u{a0}' { ' ' } else { c })),
            Node::Element(e) if e.name() == "br" => text.push('\n'),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn br_becomes_line_break() {
        let lines = reduce_html("<div>公历：2008年<br>农历：戊子年<BR/>  <br />干支：戊子年</div>").unwrap();
        assert_eq!(lines, vec!["公历：2008年", "农历：戊子年", "干支：戊子年"]);
    }

    #[test]
    fn nested_divs_stay_inside() {
        let html = "<p>前言</p><div class=\"a\">甲<div>乙</div><br>丙</div><div>丁</div>";
        assert_eq!(reduce_html(html).unwrap(), vec!["甲乙", "丙"]);
    }

    #[test]
    fn nbsp_and_tags_removed() {
        let html = "<div><font color=red>乾造</font>&nbsp;乙&nbsp;&nbsp;辛</div>";
        assert_eq!(reduce_html(html).unwrap(), vec!["乾造 乙  辛"]);
    }

    #[test]
    fn unclosed_div_runs_to_end() {
        assert_eq!(reduce_html("<div>甲<br>乙").unwrap(), vec!["甲", "乙"]);
    }

    #[test]
    fn angle_bracket_in_attribute_stays_out_of_text() {
        let html = "<div title=\"a>b\">乾造 乙 辛 丁 乙<br>酉 巳 未 巳</div>";
        assert_eq!(reduce_html(html).unwrap(), vec!["乾造 乙 辛 丁 乙", "酉 巳 未 巳"]);
    }

    #[test]
    fn entities_are_decoded() {
        let html = "<div>&lt;卦身&gt; 子 &amp; 午</div>";
        assert_eq!(reduce_html(html).unwrap(), vec!["<卦身> 子 & 午"]);
    }

    #[test]
    fn missing_div_is_no_content() {
        assert_eq!(reduce_html("<body>甲</body>"), Err(ExtractError::NoContent));
    }

    #[test]
    fn empty_div_gives_no_lines() {
        assert!(reduce_html("<div>  <br> </div>").unwrap().is_empty());
    }
}
