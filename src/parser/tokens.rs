//! Whitespace tokenization and a small cursor for grammar-driven consumption.

/// Solid bar used to draw hexagram lines.
pub const BAR: char = '▅';
/// Moving-yang and moving-yin marks.
pub const MOVING_GLYPHS: &[char] = &['○', '×'];

pub fn is_glyph(c: char) -> bool {
    c == BAR || MOVING_GLYPHS.contains(&c)
}

pub fn has_glyph(token: &str) -> bool {
    token.chars().any(is_glyph)
}

/// Split on any whitespace run, including the ideographic space U+3000.
pub fn split_tokens(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Tokenize a hexagram-line record. Glyph runs are first detached from
/// whatever non-glyph text they are glued to, on either side.
pub fn split_yao_tokens(line: &str) -> Vec<String> {
    split_tokens(&separate_glyphs(line))
}

fn separate_glyphs(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 8);
    let mut prev: Option<char> = None;
    for c in line.chars() {
        if let Some(p) = prev {
            let boundary = !p.is_whitespace() && !c.is_whitespace() && is_glyph(p) != is_glyph(c);
            if boundary {
                out.push(' ');
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Front-consuming cursor over a token list.
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<String>,
    pos: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn peek(&self) -> Option<&str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    pub fn next(&mut self) -> Option<String> {
        let token = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(token)
    }

    /// Consume the next token only if `pred` accepts it.
    pub fn next_if(&mut self, pred: impl Fn(&str) -> bool) -> Option<String> {
        if self.peek().is_some_and(&pred) {
            self.next()
        } else {
            None
        }
    }

    /// Consume the maximal run of tokens accepted by `pred`.
    pub fn take_while(&mut self, pred: impl Fn(&str) -> bool) -> Vec<String> {
        let mut taken = Vec::new();
        while let Some(token) = self.next_if(&pred) {
            taken.push(token);
        }
        taken
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_ideographic_space() {
        assert_eq!(split_tokens("乙　辛   丁\t乙"), vec!["乙", "辛", "丁", "乙"]);
    }

    #[test]
    fn glyph_detached_from_following_code() {
        let tokens = split_yao_tokens("玄武 ▅▅▅▅▅○子孙壬戌土 应");
        assert_eq!(tokens, vec!["玄武", "▅▅▅▅▅○", "子孙壬戌土", "应"]);
    }

    #[test]
    fn glyph_detached_on_both_sides() {
        let tokens = split_yao_tokens("青龙　癸酉金▅▅▅世 父母甲寅木");
        assert_eq!(tokens, vec!["青龙", "癸酉金", "▅▅▅", "世", "父母甲寅木"]);
    }

    #[test]
    fn broken_bar_stays_two_tokens() {
        let tokens = split_yao_tokens("螣蛇 ▅▅　▅▅ 子孙己丑土");
        assert_eq!(tokens, vec!["螣蛇", "▅▅", "▅▅", "子孙己丑土"]);
    }

    #[test]
    fn retokenizing_is_idempotent() {
        for line in [
            "青龙　癸酉金▅▅▅世 父母甲寅木",
            "玄武 ▅▅▅▅▅○子孙壬戌土 应 ▅▅　▅▅ 子孙丁未土",
            "白虎 妻财癸酉金 ▅▅▅▅▅ 父母己卯木",
            "朱雀",
            "",
        ] {
            let once = split_yao_tokens(line);
            let twice = split_yao_tokens(&once.join(" "));
            assert_eq!(once, twice, "line: {line}");
        }
    }

    #[test]
    fn cursor_primitives() {
        let mut c = TokenCursor::new(split_tokens("a ▅ ▅ b"));
        assert_eq!(c.next().as_deref(), Some("a"));
        assert!(c.next_if(|t| t == "x").is_none());
        assert_eq!(c.take_while(has_glyph), vec!["▅", "▅"]);
        assert_eq!(c.remaining(), 1);
        assert_eq!(c.peek(), Some("b"));
        c.next();
        assert!(c.is_empty());
        assert!(c.next().is_none());
    }
}
