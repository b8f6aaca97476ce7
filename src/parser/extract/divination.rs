use std::sync::LazyLock;

use regex::Regex;

use super::pillars::strip_label;
use crate::parser::tokens::split_tokens;
use crate::records::{SpiritStars, StemBranchQuad};

static HEXAGRAM_PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^主变卦\s+(\S+?)[(（](.+?)[)）](?:\s+之\s+(\S+?)[(（](.+?)[)）])?\s*(?:\[空亡[:：](.*?)\])?",
    )
    .unwrap()
});
static PAREN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[(（]([^)）]+)[)）]").unwrap());

/// Names and palaces parsed from the `主变卦` line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HexagramPair {
    pub main_name: String,
    pub main_palace: String,
    pub resultant: Option<(String, String)>,
    pub void_branches: Vec<String>,
}

/// Value after a `label：` prefix, or `None` when empty.
pub fn labeled_value(line: &str, label: &str) -> Option<String> {
    let value = strip_label(line, label);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub fn parse_birth_year(line: &str) -> Option<i32> {
    strip_label(line, "出生年")
        .trim_end_matches('年')
        .trim()
        .parse()
        .ok()
}

/// `公历：2008年12月23日 8时37分 星期二` → (timestamp, weekday).
pub fn parse_solar(line: &str) -> (Option<String>, Option<String>) {
    let value = strip_label(line, "公历");
    match value.find("星期") {
        Some(idx) => {
            let stamp = value[..idx].trim();
            let weekday = value[idx..].split_whitespace().next().map(str::to_string);
            ((!stamp.is_empty()).then(|| stamp.to_string()), weekday)
        }
        None => ((!value.is_empty()).then(|| value.to_string()), None),
    }
}

/// `干支：戊子年 甲子月 辛卯日 壬辰时`
pub fn parse_stem_branch(line: &str) -> Option<StemBranchQuad> {
    let tokens: Vec<String> = split_tokens(strip_label(line, "干支"))
        .into_iter()
        .map(|t| t.trim_end_matches(['年', '月', '日', '时']).to_string())
        .collect();
    if tokens.len() < 4 {
        return None;
    }
    Some(StemBranchQuad {
        year: tokens[0].clone(),
        month: tokens[1].clone(),
        day: tokens[2].clone(),
        hour: tokens[3].clone(),
    })
}

/// `神煞：驿马—巳 桃花—子 日禄—酉 贵人—寅午`
pub fn parse_spirit_stars(line: &str) -> SpiritStars {
    let mut stars = SpiritStars::default();
    for token in split_tokens(strip_label(line, "神煞")) {
        let Some((name, value)) = token.split_once(['—', '-', '：', ':']) else {
            continue;
        };
        let value = value.trim_start_matches(['—', '-']).to_string();
        if value.is_empty() {
            continue;
        }
        let slot = match name {
            "驿马" => &mut stars.post_horse,
            "桃花" => &mut stars.peach_blossom,
            "日禄" => &mut stars.daily_stipend,
            "贵人" => &mut stars.nobleman,
            _ => continue,
        };
        *slot = Some(value);
    }
    stars
}

/// `(卦身：子)` → `子`.
pub fn parse_hexagram_body(line: &str) -> Option<String> {
    let inner = PAREN_RE.captures(line)?.get(1)?.as_str();
    let value = strip_label(inner, "卦身");
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// `主变卦 天火同人(离宫) 之 泽火革(坎宫) [空亡:午未]`
pub fn parse_hexagram_pair(line: &str) -> Option<HexagramPair> {
    let caps = HEXAGRAM_PAIR_RE.captures(line)?;
    let text = |i: usize| caps.get(i).map(|m| m.as_str().trim().to_string());

    let resultant = match (text(3), text(4)) {
        (Some(name), Some(palace)) => Some((name, palace)),
        _ => None,
    };
    let void_branches = text(5)
        .map(|v| {
            v.chars()
                .filter(|c| !c.is_whitespace() && !matches!(c, '、' | ',' | '，'))
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    Some(HexagramPair {
        main_name: text(1)?,
        main_palace: text(2)?,
        resultant,
        void_branches,
    })
}
