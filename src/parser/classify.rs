use std::sync::LazyLock;

use regex::Regex;

static HEXAGRAM_PAIR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^主变卦").unwrap());

pub const BRANCHES: &[&str] = &[
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// Six-god names that head each hexagram-line record.
pub const SIX_GODS: &[&str] = &["青龙", "玄武", "白虎", "螣蛇", "勾陈", "朱雀"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaziLine {
    Identity,
    Solar,
    Lunar,
    PillarHeader,
    HiddenStems,
    Terrain,
    Sound,
    SolarTerm,
    ForecastHeader,
    SpiritsHeader,
    Branches,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiuyaoLine {
    Querent,
    Gender,
    BirthYear,
    Method,
    Subject,
    Solar,
    Lunar,
    StemBranch,
    Spirits,
    HexagramBody,
    HexagramPair,
    Yao,
}

type Rule<C> = (fn(&str) -> bool, C);

const BAZI_RULES: &[Rule<BaziLine>] = &[
    (|l: &str| l.starts_with("命主姓名"), BaziLine::Identity),
    (|l: &str| l.starts_with("出生公历"), BaziLine::Solar),
    (|l: &str| l.starts_with("出生农历"), BaziLine::Lunar),
    (|l: &str| l.starts_with("乾造") || l.starts_with("坤造"), BaziLine::PillarHeader),
    (|l: &str| l.starts_with("藏干"), BaziLine::HiddenStems),
    (|l: &str| l.starts_with("地势"), BaziLine::Terrain),
    (|l: &str| l.starts_with("纳音"), BaziLine::Sound),
    (|l: &str| l.starts_with("节气"), BaziLine::SolarTerm),
    (|l: &str| l.starts_with("大运"), BaziLine::ForecastHeader),
    (|l: &str| l.starts_with("神煞"), BaziLine::SpiritsHeader),
    (|l: &str| first_token_in(l, BRANCHES), BaziLine::Branches),
];

const LIUYAO_RULES: &[Rule<LiuyaoLine>] = &[
    (|l: &str| l.starts_with("求测人："), LiuyaoLine::Querent),
    (|l: &str| l.starts_with("性别："), LiuyaoLine::Gender),
    (|l: &str| l.starts_with("出生年："), LiuyaoLine::BirthYear),
    (|l: &str| l.starts_with("起卦方式："), LiuyaoLine::Method),
    (|l: &str| l.starts_with("占问事宜："), LiuyaoLine::Subject),
    (|l: &str| l.starts_with("公历："), LiuyaoLine::Solar),
    (|l: &str| l.starts_with("农历："), LiuyaoLine::Lunar),
    (|l: &str| l.starts_with("干支："), LiuyaoLine::StemBranch),
    (|l: &str| l.starts_with("神煞："), LiuyaoLine::Spirits),
    (|l: &str| l.starts_with("(卦身：") || l.starts_with("（卦身："), LiuyaoLine::HexagramBody),
    (|l: &str| HEXAGRAM_PAIR_RE.is_match(l), LiuyaoLine::HexagramPair),
    (|l: &str| SIX_GODS.iter().any(|g| l.starts_with(g)), LiuyaoLine::Yao),
];

fn first_match<C: Copy>(rules: &[Rule<C>], line: &str) -> Option<C> {
    rules.iter().find(|(pred, _)| pred(line)).map(|(_, c)| *c)
}

fn first_token_in(line: &str, set: &[&str]) -> bool {
    line.split_whitespace().next().is_some_and(|first| set.contains(&first))
}

pub fn classify_bazi(line: &str) -> Option<BaziLine> {
    first_match(BAZI_RULES, line)
}

pub fn classify_liuyao(line: &str) -> Option<LiuyaoLine> {
    first_match(LIUYAO_RULES, line)
}
