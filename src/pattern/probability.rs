use crate::indicator::utils::{mean, safe_div};
use crate::model::HistoricalPoint;
use crate::pattern::PatternKind;

/// 확률 계산에 사용하는 과거 구간 길이
const PROBABILITY_LOOKBACK: usize = 20;
/// 패턴 확률 상한
const MAX_PROBABILITY: f64 = 0.95;

/// 패턴 발생 확률 계산
///
/// `points[max(0, index - 20) ..= index]` 구간의 거래량과 추세로 패턴별 기본 확률을 보정합니다.
///
/// `probability = min(base * (1 + volume_factor * 0.3 + trend_factor * 0.2), 0.95)`
///
/// # Arguments
/// * `points` - 전체 포인트 시계열
/// * `kind` - 패턴 종류 (기본 확률 결정)
/// * `index` - 패턴이 발견된 인덱스
pub fn calculate_pattern_probability(
    points: &[HistoricalPoint],
    kind: PatternKind,
    index: usize,
) -> f64 {
    let Some(end) = points.len().checked_sub(1).map(|last| index.min(last)) else {
        return kind.base_probability().min(MAX_PROBABILITY);
    };
    let recent = &points[end.saturating_sub(PROBABILITY_LOOKBACK)..=end];
    let volumes: Vec<f64> = recent.iter().map(|p| p.volume).collect();
    let prices: Vec<f64> = recent.iter().map(|p| p.price).collect();

    let current_volume = volumes.last().copied().unwrap_or_default();
    let volume_factor = safe_div(current_volume, mean(&volumes)).min(2.0) / 2.0;
    let trend_factor = calculate_trend_factor(&prices);

    let probability = kind.base_probability() * (1.0 + volume_factor * 0.3 + trend_factor * 0.2);
    probability.min(MAX_PROBABILITY)
}

/// 평균 상대 변화율 기반 추세 계수 (0-1)
///
/// 첫 포인트는 변화율 0으로 평균에 포함됩니다.
pub fn calculate_trend_factor(prices: &[f64]) -> f64 {
    if prices.is_empty() {
        return 0.0;
    }

    let changes: Vec<f64> = std::iter::once(0.0)
        .chain(prices.windows(2).map(|pair| safe_div(pair[1] - pair[0], pair[0])))
        .collect();
    (mean(&changes).abs() * 100.0).min(1.0)
}
