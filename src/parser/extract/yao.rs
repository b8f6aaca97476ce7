//! Hexagram-line records: `六神 [伏神] 爻象 [世应] 爻辞 [世应] [变爻象 变爻辞 [世应]]`.

use tracing::debug;

use crate::parser::tokens::{has_glyph, split_yao_tokens, TokenCursor, BAR, MOVING_GLYPHS};
use crate::records::{FiveElement, LineType, Marker, YaoLine};

/// Bars longer than this are always yang.
const YIN_MAX_BARS: usize = 4;

/// Primary and resultant descriptors for one hexagram position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YaoPair {
    pub main: YaoLine,
    pub resultant: YaoLine,
}

/// Tokenize one yao record. Never fails; short lines leave fields unset.
pub fn parse_yao_line(line: &str, position: u8) -> YaoPair {
    let mut cursor = TokenCursor::new(split_yao_tokens(line));

    let mut main = YaoLine {
        position,
        six_god: cursor.next(),
        ..Default::default()
    };

    let hidden = cursor.take_while(|t| !has_glyph(t));
    if !hidden.is_empty() {
        main.hidden_god = Some(hidden.join(" "));
    }

    read_line_body(&mut cursor, &mut main);

    let mut resultant = if !cursor.is_empty() {
        let mut changed = empty_resultant(&main);
        read_line_body(&mut cursor, &mut changed);
        if !cursor.is_empty() {
            debug!(line, leftover = cursor.remaining(), "trailing tokens after resultant line");
        }
        changed
    } else if main.line_type.is_some() || main.relation.is_some() {
        settled_copy(&main)
    } else {
        empty_resultant(&main)
    };

    let marker = main.marker.or(resultant.marker);
    main.marker = marker;
    resultant.marker = marker;

    YaoPair { main, resultant }
}

/// Glyph run, optional marker, yao-ci, optional marker.
fn read_line_body(cursor: &mut TokenCursor, out: &mut YaoLine) {
    let run = cursor.take_while(has_glyph);
    if let Some(line_type) = classify_run(&run) {
        out.set_line_type(line_type);
    }

    read_marker(cursor, out);

    // A token carrying glyphs here belongs to the next line body, not to this yao-ci.
    if let Some(code) = cursor.next_if(|t| !has_glyph(t) && Marker::from_token(t).is_none()) {
        apply_yao_ci(&code, out);
    }

    read_marker(cursor, out);
}

fn read_marker(cursor: &mut TokenCursor, out: &mut YaoLine) {
    if let Some(marker) = cursor.next_if(|t| Marker::from_token(t).is_some()) {
        if out.marker.is_none() {
            out.marker = Marker::from_token(&marker);
        }
    }
}

/// Moving glyph ⇒ moving variant. More than four bars, or an unbroken
/// single-token run, ⇒ yang; otherwise yin.
pub fn classify_run(run: &[String]) -> Option<LineType> {
    if run.is_empty() {
        return None;
    }
    let joined: String = run.concat();
    let moving = joined.chars().any(|c| MOVING_GLYPHS.contains(&c));
    let bars = joined.chars().filter(|&c| c == BAR).count();
    let bar_segments = run.iter().filter(|t| t.contains(BAR)).count();
    let yang = bars > YIN_MAX_BARS || bar_segments == 1;

    Some(match (yang, moving) {
        (true, false) => LineType::Yang,
        (true, true) => LineType::YangMoving,
        (false, false) => LineType::Yin,
        (false, true) => LineType::YinMoving,
    })
}

/// `父母甲寅木`: relation, stem-branch, element.
fn apply_yao_ci(code: &str, out: &mut YaoLine) {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() >= 2 {
        out.relation = Some(chars[..2].iter().collect());
    }
    if chars.len() >= 4 {
        out.stem_branch = Some(chars[2..4].iter().collect());
    }
    out.five_element = Some(
        chars
            .get(4)
            .copied()
            .map(FiveElement::from_glyph)
            .unwrap_or(FiveElement::Unknown),
    );
}

/// Resultant slot aligned with its primary: same position and six-god, nothing else.
fn empty_resultant(main: &YaoLine) -> YaoLine {
    YaoLine {
        position: main.position,
        six_god: main.six_god.clone(),
        ..Default::default()
    }
}

/// Static position: same code, non-moving type.
fn settled_copy(main: &YaoLine) -> YaoLine {
    let mut line = YaoLine {
        relation: main.relation.clone(),
        stem_branch: main.stem_branch.clone(),
        five_element: main.five_element,
        ..empty_resultant(main)
    };
    if let Some(t) = main.line_type {
        line.set_line_type(t.settled());
    }
    line
}
