use crate::analyzer::sentiment_analyzer::MarketSentiment;
use crate::model::{MarketCondition, RiskAssessment, TechnicalIndicators};
use crate::pattern::{CandlePattern, mean_probability};

/// 리스크 평가
///
/// 레벨은 심리 분석의 변동성 구간, 점수는 스냅샷 변동성입니다.
///
/// # Arguments
/// * `sentiment` - 시장 심리 분석 결과
/// * `indicators` - 기술적 지표 스냅샷
/// * `patterns` - 탐지된 패턴 (평균 확률을 신뢰도로 표시)
pub fn assess_risk(
    sentiment: &MarketSentiment,
    indicators: &TechnicalIndicators,
    patterns: &[CandlePattern],
) -> RiskAssessment {
    RiskAssessment {
        level: sentiment.volatility_regime,
        score: indicators.volatility,
        factors: vec![
            format!("Market Sentiment: {}", sentiment.sentiment),
            format!("Volatility Regime: {}", sentiment.volatility_regime),
            format!("Momentum Score: {:.2}", sentiment.momentum_score),
            format!(
                "Pattern Reliability: {:.1}%",
                mean_probability(patterns) * 100.0
            ),
        ],
    }
}

/// 표시용 시장 상황 요약
pub fn market_condition(
    sentiment: &MarketSentiment,
    indicators: &TechnicalIndicators,
) -> MarketCondition {
    MarketCondition {
        trend: sentiment.sentiment,
        strength: sentiment.strength,
        volatility: indicators.volatility,
        volume: indicators.volume_ratio,
    }
}
