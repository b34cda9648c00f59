use crate::indicator::utils::{mean, relative_change};
use std::fmt::Display;

/// 추세 판정 임계값 (평균 변화량 절대값)
const SIDEWAYS_THRESHOLD: f64 = 1e-4;

/// 단순 추세 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
    Sideways,
}

/// 평균 변화량으로 추세 방향 판정
pub fn trend_direction(values: &[f64]) -> TrendDirection {
    let changes: Vec<f64> = values.windows(2).map(|pair| pair[1] - pair[0]).collect();
    let average_change = mean(&changes);

    if average_change.abs() < SIDEWAYS_THRESHOLD {
        TrendDirection::Sideways
    } else if average_change > 0.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    }
}

/// 다이버전스 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivergenceKind {
    /// 가격 하락, 지표 상승
    Bullish,
    /// 가격 상승, 지표 하락
    Bearish,
}

impl Display for DivergenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DivergenceKind::Bullish => write!(f, "Bullish"),
            DivergenceKind::Bearish => write!(f, "Bearish"),
        }
    }
}

/// 다이버전스 탐지 결과
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divergence {
    pub kind: Option<DivergenceKind>,
    /// 강도 (0.0-1.0), 다이버전스가 없으면 0
    pub strength: f64,
}

impl Divergence {
    /// 다이버전스 없음
    pub fn none() -> Self {
        Divergence {
            kind: None,
            strength: 0.0,
        }
    }

    /// 강도가 기준값을 초과하는 다이버전스 종류
    pub fn strong_kind(&self, threshold: f64) -> Option<DivergenceKind> {
        self.kind.filter(|_| self.strength > threshold)
    }
}

/// 가격/지표 다이버전스 탐지
///
/// 마지막 `window`개 가격과 지표값의 추세 방향을 비교합니다.
/// 강도는 `min(|가격 상대 변화 - 지표 상대 변화|, 1)`.
///
/// # Arguments
/// * `prices` - 가격 데이터 (오래된 순)
/// * `indicator` - 같은 시점에 정렬된 지표 시계열 (예: RSI 시계열)
/// * `window` - 비교 구간 (기본 10)
pub fn detect_divergence(prices: &[f64], indicator: &[f64], window: usize) -> Divergence {
    let recent_prices = &prices[prices.len().saturating_sub(window)..];
    let recent_indicator = &indicator[indicator.len().saturating_sub(window)..];

    let kind = match (
        trend_direction(recent_prices),
        trend_direction(recent_indicator),
    ) {
        (TrendDirection::Down, TrendDirection::Up) => DivergenceKind::Bullish,
        (TrendDirection::Up, TrendDirection::Down) => DivergenceKind::Bearish,
        _ => return Divergence::none(),
    };

    let strength =
        (relative_change(recent_prices) - relative_change(recent_indicator)).abs().min(1.0);
    log::trace!("{} 다이버전스 감지 (강도: {:.3})", kind, strength);

    Divergence {
        kind: Some(kind),
        strength,
    }
}
