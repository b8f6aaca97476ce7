pub mod divination;
pub mod pillars;
pub mod yao;

use tracing::{debug, warn};

use super::classify::{classify_bazi, classify_liuyao, BaziLine, LiuyaoLine};
use crate::error::{ExtractError, Result};
use crate::records::{FourPillarsRecord, Hexagram, SixLinesRecord, YaoLine};
use pillars::{FORECAST_ROWS, MAX_SPIRIT_ROWS};
use yao::YaoPair;

/// Positions per hexagram.
pub const YAO_COUNT: usize = 6;

/// Build a Four-Pillars record from the reduced report lines.
pub fn assemble_four_pillars<S: AsRef<str>>(lines: &[S]) -> Result<FourPillarsRecord> {
    if lines.is_empty() {
        return Err(ExtractError::EmptyDocument);
    }
    let lines: Vec<&str> = lines.iter().map(|l| l.as_ref().trim()).collect();
    let mut record = FourPillarsRecord::default();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        i += 1;

        let Some(kind) = classify_bazi(line) else {
            debug!(line, "unrecognized line skipped");
            continue;
        };

        match kind {
            BaziLine::Identity => {
                let (name, birthplace) = pillars::parse_identity(line);
                record.name = name.or(record.name.take());
                record.birthplace = birthplace.or(record.birthplace.take());
            }
            BaziLine::Solar => record.solar = pillars::parse_solar(line),
            BaziLine::Lunar => record.lunar = pillars::parse_lunar(line),
            BaziLine::PillarHeader => match pillars::parse_pillar_header(line) {
                Some(p) => record.pillars = Some(p),
                None => debug!(line, "pillar header too short"),
            },
            BaziLine::Branches => {
                // Only the first branch row after the header belongs to the pillars.
                let Some(p) = record.pillars.as_mut().filter(|p| p.branches.is_none()) else {
                    debug!(line, "branch row outside pillar block");
                    continue;
                };
                p.branches = pillars::parse_branches(line);
            }
            BaziLine::HiddenStems => {
                record.hidden_stems = Some(pillars::parse_labeled_list(line, "藏干"));
            }
            BaziLine::Terrain => record.terrain = pillars::parse_labeled_list(line, "地势"),
            BaziLine::Sound => record.sound = pillars::parse_labeled_list(line, "纳音"),
            BaziLine::SolarTerm => record.solar_term = pillars::parse_solar_term(line),
            BaziLine::ForecastHeader => {
                let rows = &lines[i..lines.len().min(i + FORECAST_ROWS)];
                if rows.len() < FORECAST_ROWS {
                    // Leave the following lines to be classified on their own.
                    warn!(rows = rows.len(), "forecast table truncated, skipped");
                    continue;
                }
                record.forecast = pillars::parse_forecast_table(rows);
                i += FORECAST_ROWS;
            }
            BaziLine::SpiritsHeader => {
                let mut taken = 0;
                while taken < MAX_SPIRIT_ROWS && i < lines.len() {
                    let row = lines[i];
                    if classify_bazi(row).is_some_and(|c| c != BaziLine::Branches) {
                        break;
                    }
                    if let Some((key, names)) = pillars::parse_spirit_row(row) {
                        record.spirits.insert(key, names);
                    }
                    taken += 1;
                    i += 1;
                }
            }
        }
    }

    Ok(record)
}

/// Build a Six-Lines record from the reduced report lines.
pub fn assemble_six_lines<S: AsRef<str>>(lines: &[S]) -> Result<SixLinesRecord> {
    if lines.is_empty() {
        return Err(ExtractError::EmptyDocument);
    }
    let mut record = SixLinesRecord::default();
    let mut pair_line = None;
    let mut yao_lines: Vec<&str> = Vec::with_capacity(YAO_COUNT);

    for line in lines.iter().map(|l| l.as_ref().trim()) {
        let Some(kind) = classify_liuyao(line) else {
            debug!(line, "unrecognized line skipped");
            continue;
        };
        let info = &mut record.divination_info;
        let temporal = &mut record.temporal_info;

        match kind {
            LiuyaoLine::Querent => info.querent = divination::labeled_value(line, "求测人"),
            LiuyaoLine::Gender => info.gender = divination::labeled_value(line, "性别"),
            LiuyaoLine::BirthYear => info.birth_year = divination::parse_birth_year(line),
            LiuyaoLine::Method => info.method = divination::labeled_value(line, "起卦方式"),
            LiuyaoLine::Subject => info.subject = divination::labeled_value(line, "占问事宜"),
            LiuyaoLine::Solar => {
                (temporal.solar, temporal.weekday) = divination::parse_solar(line);
            }
            LiuyaoLine::Lunar => temporal.lunar = divination::labeled_value(line, "农历"),
            LiuyaoLine::StemBranch => temporal.stem_branch = divination::parse_stem_branch(line),
            LiuyaoLine::Spirits => temporal.spirit_stars = divination::parse_spirit_stars(line),
            LiuyaoLine::HexagramBody => {
                temporal.hexagram_body = divination::parse_hexagram_body(line);
            }
            LiuyaoLine::HexagramPair => {
                if pair_line.is_none() {
                    pair_line = divination::parse_hexagram_pair(line);
                }
            }
            LiuyaoLine::Yao => yao_lines.push(line),
        }
    }

    if yao_lines.len() > YAO_COUNT {
        warn!(found = yao_lines.len(), "more than six yao lines, extras ignored");
        yao_lines.truncate(YAO_COUNT);
    } else if !yao_lines.is_empty() && yao_lines.len() < YAO_COUNT {
        warn!(found = yao_lines.len(), "incomplete hexagram");
    }

    // Source order is top-down, so the first record is position 6.
    let mut pairs: Vec<YaoPair> = yao_lines
        .iter()
        .enumerate()
        .map(|(k, line)| yao::parse_yao_line(line, (YAO_COUNT - k) as u8))
        .collect();
    pairs.reverse();

    let (main_lines, resultant_lines): (Vec<YaoLine>, Vec<YaoLine>) =
        pairs.into_iter().map(|p| (p.main, p.resultant)).unzip();
    let mut main = Hexagram {
        lines: main_lines,
        ..Default::default()
    };
    let mut resultant = Hexagram {
        lines: resultant_lines,
        ..Default::default()
    };

    if let Some(pair) = pair_line {
        // No moving lines: the resultant hexagram is the main one.
        let (name, palace) = pair
            .resultant
            .unwrap_or_else(|| (pair.main_name.clone(), pair.main_palace.clone()));
        resultant.name = Some(name);
        resultant.palace = Some(palace);
        main.name = Some(pair.main_name);
        main.palace = Some(pair.main_palace);
        record.temporal_info.void_branches = pair.void_branches;
    } else {
        debug!("no 主变卦 line");
    }

    record.hexagrams.main = main;
    record.hexagrams.resultant = resultant;
    Ok(record)
}

// ── Tests ──
