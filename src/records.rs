use std::collections::BTreeMap;

use serde::Serialize;

// ── Four Pillars (八字) ──

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FourPillarsRecord {
    #[serde(rename = "姓名", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "出生地", skip_serializing_if = "Option::is_none")]
    pub birthplace: Option<String>,
    #[serde(rename = "公历", skip_serializing_if = "Option::is_none")]
    pub solar: Option<String>,
    #[serde(rename = "农历", skip_serializing_if = "Option::is_none")]
    pub lunar: Option<String>,
    #[serde(rename = "四柱", skip_serializing_if = "Option::is_none")]
    pub pillars: Option<Pillars>,
    #[serde(rename = "藏干", skip_serializing_if = "Option::is_none")]
    pub hidden_stems: Option<Vec<String>>,
    #[serde(rename = "地势", skip_serializing_if = "Vec::is_empty")]
    pub terrain: Vec<String>,
    #[serde(rename = "纳音", skip_serializing_if = "Vec::is_empty")]
    pub sound: Vec<String>,
    #[serde(rename = "节气", skip_serializing_if = "Option::is_none")]
    pub solar_term: Option<String>,
    #[serde(rename = "大运", skip_serializing_if = "Vec::is_empty")]
    pub forecast: Vec<ForecastEntry>,
    #[serde(rename = "神煞", skip_serializing_if = "BTreeMap::is_empty")]
    pub spirits: BTreeMap<String, Vec<String>>,
}

/// Stems and branches indexed year, month, day, hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pillars {
    /// `乾造` or `坤造`.
    #[serde(rename = "类型")]
    pub kind: String,
    #[serde(rename = "天干")]
    pub stems: [String; 4],
    #[serde(rename = "地支", skip_serializing_if = "Option::is_none")]
    pub branches: Option<[String; 4]>,
}

/// One column of the multi-year forecast table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastEntry {
    #[serde(rename = "大运", skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(rename = "干支", skip_serializing_if = "Option::is_none")]
    pub stem_branch: Option<String>,
    #[serde(rename = "地势", skip_serializing_if = "Option::is_none")]
    pub terrain: Option<String>,
    #[serde(rename = "岁数", skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(rename = "年份", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

// ── Six Lines (六爻) ──

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SixLinesRecord {
    pub divination_info: DivinationInfo,
    pub temporal_info: TemporalInfo,
    pub hexagrams: Hexagrams,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DivinationInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub querent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stem_branch: Option<StemBranchQuad>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hexagram_body: Option<String>,
    pub spirit_stars: SpiritStars,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub void_branches: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StemBranchQuad {
    pub year: String,
    pub month: String,
    pub day: String,
    pub hour: String,
}

/// The four named stars of the `神煞：` line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpiritStars {
    /// 驿马
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_horse: Option<String>,
    /// 桃花
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peach_blossom: Option<String>,
    /// 日禄
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_stipend: Option<String>,
    /// 贵人
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nobleman: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Hexagrams {
    pub main: Hexagram,
    pub resultant: Hexagram,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Hexagram {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palace: Option<String>,
    /// Bottom (position 1) to top (position 6).
    pub lines: Vec<YaoLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YaoLine {
    pub position: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub six_god: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden_god: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_type: Option<LineType>,
    pub moving: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stem_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub five_element: Option<FiveElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

impl YaoLine {
    pub fn set_line_type(&mut self, line_type: LineType) {
        self.line_type = Some(line_type);
        self.moving = line_type.is_moving();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineType {
    Yang,
    Yin,
    YangMoving,
    YinMoving,
}

impl LineType {
    pub fn is_moving(self) -> bool {
        matches!(self, LineType::YangMoving | LineType::YinMoving)
    }

    /// The same family without the moving flag.
    pub fn settled(self) -> Self {
        match self {
            LineType::Yang | LineType::YangMoving => LineType::Yang,
            LineType::Yin | LineType::YinMoving => LineType::Yin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FiveElement {
    Metal,
    Wood,
    Water,
    Fire,
    Earth,
    Unknown,
}

impl FiveElement {
    pub fn from_glyph(c: char) -> Self {
        match c {
            '金' => FiveElement::Metal,
            '木' => FiveElement::Wood,
            '水' => FiveElement::Water,
            '火' => FiveElement::Fire,
            '土' => FiveElement::Earth,
            _ => FiveElement::Unknown,
        }
    }
}

/// `世` / `应`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Marker {
    #[serde(rename = "世")]
    World,
    #[serde(rename = "应")]
    Response,
}

impl Marker {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "世" => Some(Marker::World),
            "应" => Some(Marker::Response),
            _ => None,
        }
    }
}

/// Either record family, as handed to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    FourPillars(FourPillarsRecord),
    SixLines(SixLinesRecord),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_drops_moving() {
        assert_eq!(LineType::YangMoving.settled(), LineType::Yang);
        assert_eq!(LineType::YinMoving.settled(), LineType::Yin);
        assert_eq!(LineType::Yin.settled(), LineType::Yin);
        assert!(!LineType::YangMoving.settled().is_moving());
    }

    #[test]
    fn moving_flag_follows_type() {
        let mut line = YaoLine::default();
        line.set_line_type(LineType::YinMoving);
        assert!(line.moving);
        line.set_line_type(LineType::Yin);
        assert!(!line.moving);
    }

    #[test]
    fn element_table() {
        assert_eq!(FiveElement::from_glyph('木'), FiveElement::Wood);
        assert_eq!(FiveElement::from_glyph('土'), FiveElement::Earth);
        assert_eq!(FiveElement::from_glyph('?'), FiveElement::Unknown);
    }

    #[test]
    fn yao_line_json_keys() {
        let mut line = YaoLine {
            position: 6,
            six_god: Some("青龙".into()),
            relation: Some("父母".into()),
            stem_branch: Some("甲寅".into()),
            five_element: Some(FiveElement::Wood),
            marker: Some(Marker::World),
            ..Default::default()
        };
        line.set_line_type(LineType::Yang);
        let v = serde_json::to_value(&line).unwrap();
        assert_eq!(v["sixGod"], "青龙");
        assert_eq!(v["lineType"], "Yang");
        assert_eq!(v["stemBranch"], "甲寅");
        assert_eq!(v["fiveElement"], "Wood");
        assert_eq!(v["marker"], "世");
        assert!(v.get("hiddenGod").is_none());
    }

    #[test]
    fn four_pillars_json_uses_chinese_keys() {
        let record = FourPillarsRecord {
            name: Some("某人".into()),
            forecast: vec![ForecastEntry {
                age: Some(6),
                year: Some(2010),
                ..Default::default()
            }],
            ..Default::default()
        };
        let v = serde_json::to_value(&record).unwrap();
        assert_eq!(v["姓名"], "某人");
        assert_eq!(v["大运"][0]["岁数"], 6);
        assert_eq!(v["大运"][0]["年份"], 2010);
        assert!(v.get("出生地").is_none());
    }
}
