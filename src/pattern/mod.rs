// 패턴 인식 모듈
// 캔들 패턴, 이중 천장/바닥, 피보나치 레벨, 다이버전스를 제공합니다.

pub mod candle;
pub mod divergence;
pub mod double;
pub mod fibonacci;
pub mod probability;

use crate::config::AnalysisConfig;
use crate::model::HistoricalPoint;
use crate::pattern::candle::{
    PriceAction, is_bearish_engulfing, is_bullish_engulfing, is_doji, is_evening_star, is_hammer,
    is_morning_star, is_shooting_star, is_three_black_crows, is_three_white_soldiers,
};
use crate::pattern::double::find_double_pattern;
use crate::pattern::probability::calculate_pattern_probability;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 패턴 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternDirection {
    Bullish,
    Bearish,
    Neutral,
}

impl Display for PatternDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternDirection::Bullish => write!(f, "Bullish"),
            PatternDirection::Bearish => write!(f, "Bearish"),
            PatternDirection::Neutral => write!(f, "Neutral"),
        }
    }
}

/// 패턴 중요도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    Major,
    Minor,
}

/// 패턴 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    Reversal,
    Continuation,
}

/// 패턴이 유효한 시간 범위
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Short,
    Medium,
    Long,
}

/// 인식 가능한 패턴 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    /// 도지 - 시장 우유부단함
    Doji,
    /// 망치형 - 하단 반전
    Hammer,
    /// 유성형 - 상단 반전
    ShootingStar,
    /// 상승 장악형
    BullishEngulfing,
    /// 하락 장악형
    BearishEngulfing,
    /// 샛별형 - 상승 반전
    MorningStar,
    /// 석별형 - 하락 반전
    EveningStar,
    /// 적삼병 - 강한 상승
    ThreeWhiteSoldiers,
    /// 흑삼병 - 강한 하락
    ThreeBlackCrows,
    /// 이중 천장
    DoubleTop,
    /// 이중 바닥
    DoubleBottom,
}

impl PatternKind {
    /// 표시 이름
    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::Doji => "Doji",
            PatternKind::Hammer => "Hammer",
            PatternKind::ShootingStar => "Shooting Star",
            PatternKind::BullishEngulfing => "Bullish Engulfing",
            PatternKind::BearishEngulfing => "Bearish Engulfing",
            PatternKind::MorningStar => "Morning Star",
            PatternKind::EveningStar => "Evening Star",
            PatternKind::ThreeWhiteSoldiers => "Three White Soldiers",
            PatternKind::ThreeBlackCrows => "Three Black Crows",
            PatternKind::DoubleTop => "Double Top",
            PatternKind::DoubleBottom => "Double Bottom",
        }
    }

    pub fn direction(&self) -> PatternDirection {
        match self {
            PatternKind::Hammer
            | PatternKind::BullishEngulfing
            | PatternKind::MorningStar
            | PatternKind::ThreeWhiteSoldiers
            | PatternKind::DoubleBottom => PatternDirection::Bullish,
            PatternKind::ShootingStar
            | PatternKind::BearishEngulfing
            | PatternKind::EveningStar
            | PatternKind::ThreeBlackCrows
            | PatternKind::DoubleTop => PatternDirection::Bearish,
            PatternKind::Doji => PatternDirection::Neutral,
        }
    }

    /// 패턴별 기본 발생 확률
    pub fn base_probability(&self) -> f64 {
        match self {
            PatternKind::Doji => 0.55,
            PatternKind::Hammer | PatternKind::ShootingStar => 0.65,
            PatternKind::BullishEngulfing | PatternKind::BearishEngulfing => 0.7,
            PatternKind::MorningStar | PatternKind::EveningStar => 0.75,
            PatternKind::ThreeWhiteSoldiers | PatternKind::ThreeBlackCrows => 0.8,
            PatternKind::DoubleTop | PatternKind::DoubleBottom => 0.7,
        }
    }

    /// 패턴 강도
    pub fn strength(&self) -> f64 {
        match self {
            PatternKind::Doji => 0.6,
            PatternKind::Hammer => 0.7,
            PatternKind::ShootingStar => 0.65,
            PatternKind::BullishEngulfing | PatternKind::BearishEngulfing => 0.8,
            PatternKind::MorningStar | PatternKind::EveningStar => 0.85,
            PatternKind::ThreeWhiteSoldiers | PatternKind::ThreeBlackCrows => 0.9,
            PatternKind::DoubleTop | PatternKind::DoubleBottom => 0.8,
        }
    }

    pub fn significance(&self) -> Significance {
        match self {
            PatternKind::Doji => Significance::Minor,
            _ => Significance::Major,
        }
    }

    pub fn pattern_type(&self) -> PatternType {
        match self {
            PatternKind::ThreeWhiteSoldiers | PatternKind::ThreeBlackCrows => {
                PatternType::Continuation
            }
            _ => PatternType::Reversal,
        }
    }

    pub fn timeframe(&self) -> Timeframe {
        match self {
            PatternKind::Doji | PatternKind::ShootingStar => Timeframe::Short,
            PatternKind::Hammer
            | PatternKind::BullishEngulfing
            | PatternKind::BearishEngulfing => Timeframe::Medium,
            _ => Timeframe::Long,
        }
    }
}

impl Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 탐지된 패턴
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandlePattern {
    /// 표시 이름
    pub pattern: String,
    pub kind: PatternKind,
    pub direction: PatternDirection,
    /// 강도 (0.0-1.0)
    pub strength: f64,
    /// 발생 확률 (0.0-0.95)
    pub probability: f64,
    pub significance: Significance,
    #[serde(rename = "type")]
    pub pattern_type: PatternType,
    pub timeframe: Timeframe,
    /// 패턴이 발견된 인덱스
    pub index: usize,
    /// 확인 레벨 (이중 천장/바닥만)
    pub confirmation_level: Option<f64>,
    /// 무효화 레벨 (이중 천장/바닥만)
    pub invalidation_level: Option<f64>,
}

impl CandlePattern {
    /// 패턴 종류와 발견 위치로 생성 (확률은 주변 거래량/추세로 계산)
    pub fn new(points: &[HistoricalPoint], kind: PatternKind, index: usize) -> Self {
        CandlePattern {
            pattern: kind.name().to_string(),
            kind,
            direction: kind.direction(),
            strength: kind.strength(),
            probability: calculate_pattern_probability(points, kind, index),
            significance: kind.significance(),
            pattern_type: kind.pattern_type(),
            timeframe: kind.timeframe(),
            index,
            confirmation_level: None,
            invalidation_level: None,
        }
    }

    pub fn is_bullish(&self) -> bool {
        self.direction == PatternDirection::Bullish
    }

    pub fn is_bearish(&self) -> bool {
        self.direction == PatternDirection::Bearish
    }
}

impl Display for CandlePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(@{}, strength: {:.2}, probability: {:.2})",
            self.pattern, self.index, self.strength, self.probability
        )
    }
}

/// 시계열 전체에서 패턴 스캔
///
/// `pattern_start_index`부터 각 인덱스에서 두 포인트로 합성한 캔들에 대해
/// 단일/다중 캔들 패턴을 검사하고, 인덱스가 `double_pattern_lookback`보다 크면
/// 직전 구간에서 이중 천장/바닥도 찾습니다. 같은 패턴이 여러 인덱스에서 반복 탐지될 수 있습니다.
///
/// # Arguments
/// * `points` - 시간 오름차순 포인트 목록
/// * `config` - 스캔 구간 / 허용 오차 설정
///
/// # Returns
/// * `Vec<CandlePattern>` - 인덱스 순서대로 탐지된 패턴
pub fn detect_candle_patterns(
    points: &[HistoricalPoint],
    config: &AnalysisConfig,
) -> Vec<CandlePattern> {
    let mut patterns = Vec::new();
    let prices: Vec<f64> = points.iter().map(|p| p.price).collect();

    for i in config.pattern_start_index.max(3)..points.len() {
        let (Some(current), Some(prev), Some(prev2)) = (
            PriceAction::from_points(points, i),
            PriceAction::from_points(points, i - 1),
            PriceAction::from_points(points, i - 2),
        ) else {
            continue;
        };

        let mut found = Vec::new();
        if is_doji(&current) {
            found.push(PatternKind::Doji);
        }
        if is_hammer(&current) {
            found.push(PatternKind::Hammer);
        }
        if is_shooting_star(&current) {
            found.push(PatternKind::ShootingStar);
        }
        if is_bullish_engulfing(&current, &prev) {
            found.push(PatternKind::BullishEngulfing);
        } else if is_bearish_engulfing(&current, &prev) {
            found.push(PatternKind::BearishEngulfing);
        }
        if is_morning_star(&current, &prev, &prev2) {
            found.push(PatternKind::MorningStar);
        } else if is_evening_star(&current, &prev, &prev2) {
            found.push(PatternKind::EveningStar);
        }
        if is_three_white_soldiers(&prev2, &prev, &current) {
            found.push(PatternKind::ThreeWhiteSoldiers);
        } else if is_three_black_crows(&prev2, &prev, &current) {
            found.push(PatternKind::ThreeBlackCrows);
        }

        for kind in found {
            log::trace!("패턴 감지: {} (인덱스 {})", kind, i);
            patterns.push(CandlePattern::new(points, kind, i));
        }

        if i > config.double_pattern_lookback {
            let window = &prices[i - config.double_pattern_lookback..=i];
            if let Some(double) = find_double_pattern(
                window,
                config.double_pattern_tolerance,
                config.double_pattern_min_separation,
            ) {
                log::trace!("패턴 감지: {} (인덱스 {})", double.kind, i);
                let mut pattern = CandlePattern::new(points, double.kind, i);
                pattern.confirmation_level = Some(double.confirmation_level);
                pattern.invalidation_level = Some(double.invalidation_level);
                patterns.push(pattern);
            }
        }
    }

    log::debug!("패턴 스캔 완료: {}개", patterns.len());
    patterns
}

/// 패턴 확률 평균 (패턴이 없으면 0)
pub fn mean_probability(patterns: &[CandlePattern]) -> f64 {
    if patterns.is_empty() {
        return 0.0;
    }
    patterns.iter().map(|p| p.probability).sum::<f64>() / patterns.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn points(prices: &[f64]) -> Vec<HistoricalPoint> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| HistoricalPoint::new(start + Duration::hours(i as i64), p, 1000.0))
            .collect()
    }

    #[test]
    fn test_pattern_kind_attributes() {
        assert_eq!(PatternKind::Doji.direction(), PatternDirection::Neutral);
        assert_eq!(PatternKind::DoubleBottom.direction(), PatternDirection::Bullish);
        assert_eq!(PatternKind::ShootingStar.direction(), PatternDirection::Bearish);
        assert_eq!(PatternKind::ThreeBlackCrows.pattern_type(), PatternType::Continuation);
        assert_eq!(PatternKind::Doji.significance(), Significance::Minor);
        assert_eq!(PatternKind::Hammer.timeframe(), Timeframe::Medium);
        assert_eq!(PatternKind::MorningStar.name(), "Morning Star");
    }

    #[test]
    fn test_flat_series_has_no_patterns() {
        let data = points(&[100.0; 40]);
        assert!(detect_candle_patterns(&data, &AnalysisConfig::default()).is_empty());
    }

    #[test]
    fn test_short_series_is_not_scanned() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        assert!(detect_candle_patterns(&points(&prices), &AnalysisConfig::default()).is_empty());
    }

    #[test]
    fn test_rising_series_yields_soldiers() {
        let prices: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
        let patterns = detect_candle_patterns(&points(&prices), &AnalysisConfig::default());
        assert_eq!(patterns.len(), 5);
        assert!(patterns.iter().all(|p| p.kind == PatternKind::ThreeWhiteSoldiers));
        assert_eq!(patterns[0].index, 20);
        assert!(patterns.iter().all(|p| p.is_bullish()));
    }

    #[test]
    fn test_morning_star_on_point_series() {
        let mut prices = vec![100.0; 20];
        prices.extend([110.0, 100.0, 99.0, 106.0]);
        let patterns = detect_candle_patterns(&points(&prices), &AnalysisConfig::default());
        let star = patterns
            .iter()
            .find(|p| p.kind == PatternKind::MorningStar)
            .unwrap();
        assert_eq!(star.index, 23);
        assert!(star.probability > 0.75 && star.probability <= 0.95);
    }

    #[test]
    fn test_double_top_carries_levels() {
        let mut prices = vec![100.0; 20];
        prices.extend([101.0, 105.0, 101.0, 100.0, 101.0, 103.0, 105.2, 103.0, 101.0]);
        prices.extend(vec![101.0; 4]);
        let patterns = detect_candle_patterns(&points(&prices), &AnalysisConfig::default());
        let double = patterns
            .iter()
            .find(|p| p.kind == PatternKind::DoubleTop)
            .unwrap();
        assert_eq!(double.confirmation_level, Some(100.0));
        assert_eq!(double.invalidation_level, Some(105.2));
        assert!(double.is_bearish());
    }

    #[test]
    fn test_mean_probability() {
        assert_eq!(mean_probability(&[]), 0.0);
        let data = points(&[100.0; 30]);
        let a = CandlePattern::new(&data, PatternKind::Doji, 25);
        let b = CandlePattern::new(&data, PatternKind::Hammer, 25);
        let expected = (a.probability + b.probability) / 2.0;
        assert!((mean_probability(&[a, b]) - expected).abs() < 1e-12);
    }
}
