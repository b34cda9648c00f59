use crate::config::AnalysisConfig;
use crate::model::TechnicalIndicators;

/// 기본 신뢰도
const BASE_SCORE: f64 = 0.5;
/// StochRSI 과매도 기준
const STOCH_RSI_OVERSOLD: f64 = 20.0;
/// StochRSI 과매수 기준
const STOCH_RSI_OVERBOUGHT: f64 = 80.0;

/// 지표 스냅샷으로부터 신뢰도 점수 계산
///
/// 0.5에서 시작해 RSI, StochRSI, MACD, 볼린저 밴드, 거래량 신호별로 고정 가감 후
/// `(1 + 추세 강도)`를 곱하고 [0, 1]로 제한합니다.
///
/// # Arguments
/// * `indicators` - 기술적 지표 스냅샷
/// * `config` - RSI/거래량 기준값
///
/// # Returns
/// * `f64` - 신뢰도 (0.0-1.0)
pub fn calculate_confidence_score(
    indicators: &TechnicalIndicators,
    config: &AnalysisConfig,
) -> f64 {
    let mut score = BASE_SCORE;

    if indicators.rsi < config.rsi_oversold {
        score += 0.1;
    }
    if indicators.rsi > config.rsi_overbought {
        score -= 0.1;
    }

    if indicators.stoch_rsi < STOCH_RSI_OVERSOLD {
        score += 0.1;
    }
    if indicators.stoch_rsi > STOCH_RSI_OVERBOUGHT {
        score -= 0.1;
    }

    if indicators.has_bullish_macd() {
        score += 0.15;
    }
    if indicators.has_bearish_macd() {
        score -= 0.15;
    }

    if indicators.is_below_band() {
        score += 0.1;
    }
    if indicators.is_above_band() {
        score -= 0.1;
    }

    if indicators.volume_ratio > config.volume_confirmation_ratio {
        score += 0.1;
    }

    score *= 1.0 + indicators.patterns.trend_strength;
    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BollingerBands, PriceLevels};

    fn neutral_snapshot() -> TechnicalIndicators {
        TechnicalIndicators {
            price: 100.0,
            rsi: 50.0,
            stoch_rsi: 50.0,
            macd: 0.0,
            signal: 0.0,
            histogram: 0.0,
            bollinger_bands: BollingerBands {
                upper: 100.0,
                middle: 100.0,
                lower: 100.0,
            },
            patterns: PriceLevels {
                support_level: 95.0,
                resistance_level: 105.0,
                trend_strength: 0.0,
            },
            volatility: 0.0,
            volume_ratio: 1.0,
        }
    }

    #[test]
    fn test_neutral_snapshot_is_base_score() {
        let config = AnalysisConfig::default();
        assert_eq!(calculate_confidence_score(&neutral_snapshot(), &config), 0.5);
    }

    #[test]
    fn test_bullish_signals_add_up() {
        let config = AnalysisConfig::default();
        let snapshot = TechnicalIndicators {
            rsi: 25.0,
            stoch_rsi: 10.0,
            volume_ratio: 2.0,
            ..neutral_snapshot()
        };
        // 0.5 + 0.1 + 0.1 + 0.1
        assert!((calculate_confidence_score(&snapshot, &config) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_bearish_macd_and_band() {
        let config = AnalysisConfig::default();
        let snapshot = TechnicalIndicators {
            macd: -1.0,
            histogram: -0.5,
            price: 101.0,
            ..neutral_snapshot()
        };
        // 0.5 - 0.15 - 0.1
        assert!((calculate_confidence_score(&snapshot, &config) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_trend_strength_scales_and_clamps() {
        let config = AnalysisConfig::default();
        let mut snapshot = neutral_snapshot();
        snapshot.patterns.trend_strength = 0.5;
        assert!((calculate_confidence_score(&snapshot, &config) - 0.75).abs() < 1e-12);

        snapshot.patterns.trend_strength = 1.0;
        snapshot.rsi = 20.0;
        assert_eq!(calculate_confidence_score(&snapshot, &config), 1.0);
    }
}
