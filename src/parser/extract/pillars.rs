use crate::parser::tokens::split_tokens;
use crate::records::{ForecastEntry, Pillars};

/// Header line plus the five table rows that follow `大运`.
pub const FORECAST_ROWS: usize = 5;
/// Year, month, day and hour rows under `神煞`.
pub const MAX_SPIRIT_ROWS: usize = 4;

const SOLAR_CUTOFFS: &[&str] = &["(北京时间)", "（北京时间）"];

/// Drop `label` and an optional colon after it.
pub fn strip_label<'a>(line: &'a str, label: &str) -> &'a str {
    let rest = line.strip_prefix(label).unwrap_or(line);
    rest.trim_start()
        .trim_start_matches(['：', ':'])
        .trim()
}

fn strip_period(s: &str) -> String {
    s.replace('。', "").trim().to_string()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// `命主姓名：某人，出生地：山东 济南。` → (name, birthplace).
pub fn parse_identity(line: &str) -> (Option<String>, Option<String>) {
    let mut parts = line.split('，');
    let name = parts
        .next()
        .map(|p| strip_label(p, "命主姓名").to_string())
        .and_then(non_empty);
    let birthplace = parts
        .next()
        .map(|p| strip_period(strip_label(p.trim(), "出生地")))
        .and_then(non_empty);
    (name, birthplace)
}

pub fn parse_solar(line: &str) -> Option<String> {
    let mut value = strip_label(line, "出生公历");
    for cutoff in SOLAR_CUTOFFS {
        if let Some((head, _)) = value.split_once(cutoff) {
            value = head;
        }
    }
    non_empty(value.trim().to_string())
}

pub fn parse_lunar(line: &str) -> Option<String> {
    non_empty(strip_period(strip_label(line, "出生农历")))
}

pub fn parse_solar_term(line: &str) -> Option<String> {
    non_empty(strip_period(strip_label(line, "节气")))
}

/// `乾造 乙 辛 丁 乙（日空申、酉）`
pub fn parse_pillar_header(line: &str) -> Option<Pillars> {
    let tokens = split_tokens(line);
    if tokens.len() < 5 {
        return None;
    }
    let hour = tokens[4]
        .split(['（', '('])
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();
    Some(Pillars {
        kind: tokens[0].clone(),
        stems: [tokens[1].clone(), tokens[2].clone(), tokens[3].clone(), hour],
        branches: None,
    })
}

/// `酉 巳 未 巳`
pub fn parse_branches(line: &str) -> Option<[String; 4]> {
    let tokens = split_tokens(line);
    if tokens.len() < 4 {
        return None;
    }
    Some([
        tokens[0].clone(),
        tokens[1].clone(),
        tokens[2].clone(),
        tokens[3].clone(),
    ])
}

/// Everything after the leading label: `藏干：辛 丙戊庚` → [辛, 丙戊庚].
pub fn parse_labeled_list(line: &str, label: &str) -> Vec<String> {
    split_tokens(strip_label(line, label))
}

/// Transpose the forecast rows into one entry per column.
///
/// Row 0 holds the period labels; rows 1–4 are `干支`, `地势`, `岁数`, `年份`,
/// each led by a row label. Column count follows row 1.
pub fn parse_forecast_table(rows: &[&str]) -> Vec<ForecastEntry> {
    if rows.len() < FORECAST_ROWS {
        return Vec::new();
    }
    let periods = split_tokens(rows[0]);
    let data: Vec<Vec<String>> = rows[1..FORECAST_ROWS]
        .iter()
        .map(|row| split_tokens(row).into_iter().skip(1).collect())
        .collect();

    let cell = |row: usize, col: usize| data[row].get(col).cloned();
    let number = |row: usize, col: usize| data[row].get(col).and_then(|v| v.parse::<i32>().ok());

    (0..data[0].len())
        .map(|col| ForecastEntry {
            period: periods.get(col).cloned(),
            stem_branch: cell(0, col),
            terrain: cell(1, col),
            age: number(2, col),
            year: number(3, col),
        })
        .collect()
}

/// `年柱 将星 华盖` → ("年柱", [将星, 华盖]).
pub fn parse_spirit_row(line: &str) -> Option<(String, Vec<String>)> {
    let mut tokens = split_tokens(line).into_iter();
    let key = tokens.next()?;
    let key = key.trim_end_matches(['：', ':']).to_string();
    Some((key, tokens.collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_with_birthplace() {
        let (name, place) = parse_identity("命主姓名：某人，出生地：山东 济南。");
        assert_eq!(name.as_deref(), Some("某人"));
        assert_eq!(place.as_deref(), Some("山东 济南"));
    }

    #[test]
    fn identity_without_birthplace() {
        let (name, place) = parse_identity("命主姓名：张三");
        assert_eq!(name.as_deref(), Some("张三"));
        assert!(place.is_none());
    }

    #[test]
    fn solar_truncated_at_beijing_time() {
        assert_eq!(
            parse_solar("出生公历：2005年5月23日 9时0分 (北京时间)").as_deref(),
            Some("2005年5月23日 9时0分")
        );
        assert_eq!(
            parse_solar("出生公历：2005年5月23日 9时0分（北京时间），真太阳时").as_deref(),
            Some("2005年5月23日 9时0分")
        );
    }

    #[test]
    fn lunar_strips_period() {
        assert_eq!(
            parse_lunar("出生农历：乙酉年 四月 十六日 巳时。").as_deref(),
            Some("乙酉年 四月 十六日 巳时")
        );
    }

    #[test]
    fn pillar_header_strips_parenthetical() {
        let p = parse_pillar_header("乾造 乙　辛　丁　乙（日空申、酉）").unwrap();
        assert_eq!(p.kind, "乾造");
        assert_eq!(p.stems, ["乙", "辛", "丁", "乙"].map(String::from));
        assert!(p.branches.is_none());
    }

    #[test]
    fn short_pillar_header_is_ignored() {
        assert!(parse_pillar_header("坤造 甲 丙").is_none());
        assert!(parse_branches("酉 巳").is_none());
    }

    #[test]
    fn labeled_list_with_and_without_colon() {
        assert_eq!(parse_labeled_list("藏干：辛　丙戊庚", "藏干"), vec!["辛", "丙戊庚"]);
        assert_eq!(parse_labeled_list("纳音 泉中水 白蜡金", "纳音"), vec!["泉中水", "白蜡金"]);
    }

    #[test]
    fn forecast_table_transposes_columns() {
        let rows = [
            "一运 二运 三运",
            "干支 庚辰 己卯 戊寅",
            "长生 衰 帝旺 临官",
            "岁数 6 16 26",
            "年份 2010 2020 2030",
        ];
        let table = parse_forecast_table(&rows);
        assert_eq!(table.len(), 3);
        assert_eq!(table[1].period.as_deref(), Some("二运"));
        assert_eq!(table[1].stem_branch.as_deref(), Some("己卯"));
        assert_eq!(table[1].terrain.as_deref(), Some("帝旺"));
        assert_eq!(table[1].age, Some(16));
        assert_eq!(table[2].year, Some(2030));
    }

    #[test]
    fn forecast_short_rows_leave_gaps() {
        let rows = ["一运 二运", "干支 庚辰 己卯", "长生 衰", "岁数 6 x", "年份 2010 2020"];
        let table = parse_forecast_table(&rows);
        assert_eq!(table.len(), 2);
        assert!(table[1].terrain.is_none());
        assert!(table[1].age.is_none());
        assert_eq!(table[1].year, Some(2020));
    }

    #[test]
    fn forecast_needs_five_rows() {
        assert!(parse_forecast_table(&["一运", "干支 庚辰"]).is_empty());
    }

    #[test]
    fn spirit_row_key_and_names() {
        let (key, names) = parse_spirit_row("年柱： 将星 华盖").unwrap();
        assert_eq!(key, "年柱");
        assert_eq!(names, vec!["将星", "华盖"]);
        assert!(parse_spirit_row("   ").is_none());
    }
}
