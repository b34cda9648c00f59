use crate::config::AnalysisConfig;
use crate::indicator::utils::{relative_change, sign};
use crate::indicator::volatility::calculate_volatility;
use crate::indicator::volume::VolumeProfile;
use crate::model::{SentimentLabel, VolatilityRegime};
use crate::pattern::{CandlePattern, PatternDirection};
use std::fmt::Display;

/// 심리 점수 분류 기준
const SENTIMENT_THRESHOLD: f64 = 0.1;
/// 거래량 압력 기여도
const VOLUME_WEIGHT: f64 = 0.2;
/// RSI / MACD 기여도
const OSCILLATOR_WEIGHT: f64 = 0.15;
/// 패턴 기여도 (강도 * 확률에 곱함)
const PATTERN_WEIGHT: f64 = 0.2;

/// 시장 심리 분석 결과
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSentiment {
    pub sentiment: SentimentLabel,
    /// 심리 점수의 절대값
    pub strength: f64,
    /// 기여한 신호 설명 (평가 순서 유지)
    pub factors: Vec<String>,
    pub volatility_regime: VolatilityRegime,
    pub momentum_score: f64,
}

impl Display for MarketSentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sentiment({}, strength: {:.3}, volatility: {}, momentum: {:.3})",
            self.sentiment, self.strength, self.volatility_regime, self.momentum_score
        )
    }
}

impl MarketSentiment {
    pub fn is_bullish(&self) -> bool {
        self.sentiment == SentimentLabel::Bullish
    }

    pub fn is_bearish(&self) -> bool {
        self.sentiment == SentimentLabel::Bearish
    }
}

/// 시장 심리 분석기
///
/// 거래량 압력, RSI, MACD 히스토그램, 탐지된 패턴을 하나의 점수로 합산합니다.
#[derive(Debug)]
pub struct SentimentAnalyzer<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> SentimentAnalyzer<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        SentimentAnalyzer { config }
    }

    /// 시장 심리 분석
    ///
    /// # Arguments
    /// * `prices` - 가격 데이터 (오래된 순)
    /// * `volumes` - 거래량 데이터
    /// * `rsi` - 현재 RSI
    /// * `macd_histogram` - 현재 MACD 히스토그램
    /// * `patterns` - 탐지된 패턴 목록
    ///
    /// # Returns
    /// * `MarketSentiment` - 심리 라벨, 강도, 요인, 변동성 구간, 모멘텀 점수
    pub fn analyze(
        &self,
        prices: &[f64],
        volumes: &[f64],
        rsi: f64,
        macd_histogram: f64,
        patterns: &[CandlePattern],
    ) -> MarketSentiment {
        let profile = VolumeProfile::analyze(prices, volumes);
        let volatility = calculate_volatility(
            prices,
            self.config.volatility_period,
            self.config.default_volatility,
        );

        let mut factors = Vec::new();
        let mut score = 0.0;

        if profile.is_buying_dominant() {
            score += VOLUME_WEIGHT;
            factors.push(format!(
                "Strong buying pressure: {:.2}",
                profile.buying_pressure
            ));
        } else if profile.is_selling_dominant() {
            score -= VOLUME_WEIGHT;
            factors.push(format!(
                "Strong selling pressure: {:.2}",
                profile.selling_pressure
            ));
        }

        if rsi < self.config.rsi_oversold {
            score += OSCILLATOR_WEIGHT;
            factors.push("Oversold conditions (RSI)".to_string());
        } else if rsi > self.config.rsi_overbought {
            score -= OSCILLATOR_WEIGHT;
            factors.push("Overbought conditions (RSI)".to_string());
        }

        if macd_histogram > 0.0 {
            score += OSCILLATOR_WEIGHT;
            factors.push("Positive MACD momentum".to_string());
        } else if macd_histogram < 0.0 {
            score -= OSCILLATOR_WEIGHT;
            factors.push("Negative MACD momentum".to_string());
        }

        for pattern in patterns {
            let impact = pattern.strength * pattern.probability * PATTERN_WEIGHT;
            match pattern.direction {
                PatternDirection::Bullish => {
                    score += impact;
                    factors.push(format!("Bullish {} pattern detected", pattern.pattern));
                }
                PatternDirection::Bearish => {
                    score -= impact;
                    factors.push(format!("Bearish {} pattern detected", pattern.pattern));
                }
                PatternDirection::Neutral => {}
            }
        }

        let sentiment = if score > SENTIMENT_THRESHOLD {
            SentimentLabel::Bullish
        } else if score < -SENTIMENT_THRESHOLD {
            SentimentLabel::Bearish
        } else {
            SentimentLabel::Neutral
        };

        let result = MarketSentiment {
            sentiment,
            strength: score.abs(),
            factors,
            volatility_regime: VolatilityRegime::from_volatility(volatility),
            momentum_score: calculate_momentum_score(prices, &profile, rsi, macd_histogram),
        };
        log::debug!("{}", result);
        result
    }
}

/// 모멘텀 점수
///
/// `0.4 * 전체 가격 변화율 + 0.2 * sign(거래량 변화) + 0.2 * (rsi - 50) / 50 + 0.2 * sign(히스토그램)`
pub fn calculate_momentum_score(
    prices: &[f64],
    profile: &VolumeProfile,
    rsi: f64,
    macd_histogram: f64,
) -> f64 {
    0.4 * relative_change(prices)
        + 0.2 * sign(profile.volume_change)
        + 0.2 * (rsi - 50.0) / 50.0
        + 0.2 * sign(macd_histogram)
}
