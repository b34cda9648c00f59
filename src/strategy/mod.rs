// 매매 제안 모듈
// 지표, 패턴, 시장 심리를 하나의 매매 제안으로 결합합니다.

pub mod signal;
pub mod targets;

use crate::analyzer::{SentimentAnalyzer, assess_risk, calculate_confidence_score, market_condition};
use crate::config::AnalysisConfig;
use crate::config_loader::ConfigValidation;
use crate::error::AnalysisResult;
use crate::indicator::analyze_technical_indicators;
use crate::indicator::rsi::calculate_rsi_series;
use crate::model::{HistoricalPoint, TradingSuggestion};
use crate::pattern::divergence::detect_divergence;
use crate::pattern::fibonacci::FibonacciLevels;
use crate::pattern::{detect_candle_patterns, mean_probability};
use crate::series::PriceSeries;
use crate::source::{Clock, HistoricalDataSource, SystemClock};
use chrono::Duration;
use log::{debug, info, warn};
use signal::{SignalContext, SignalEvaluator, apply_conflict_override, default_evaluators, resolve};
use targets::calculate_targets;

/// 신뢰도 가중치: 지표 신뢰도, 심리 강도, 평균 패턴 확률, 다이버전스 강도
const CONFIDENCE_WEIGHTS: [f64; 4] = [0.4, 0.3, 0.2, 0.1];

/// 매매 제안 엔진
///
/// 입력 시계열에 대한 순수 함수이며 호출 간 공유 상태가 없습니다.
/// 시각은 주입된 `Clock`에서만 읽습니다.
pub struct SuggestionEngine {
    config: AnalysisConfig,
    clock: Box<dyn Clock>,
    evaluators: Vec<Box<dyn SignalEvaluator>>,
}

impl std::fmt::Debug for SuggestionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.evaluators.iter().map(|e| e.name()).collect();
        f.debug_struct("SuggestionEngine")
            .field("config", &self.config)
            .field("evaluators", &names)
            .finish()
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        SuggestionEngine {
            config: AnalysisConfig::default(),
            clock: Box::new(SystemClock),
            evaluators: default_evaluators(),
        }
    }
}

impl SuggestionEngine {
    /// 새 엔진 생성 (설정 유효성 검사 포함)
    ///
    /// # Arguments
    /// * `config` - 분석 설정
    /// * `clock` - 유효 기간 계산에 사용할 시계
    pub fn new(config: AnalysisConfig, clock: impl Clock + 'static) -> AnalysisResult<Self> {
        config.validate()?;
        Ok(SuggestionEngine {
            config,
            clock: Box::new(clock),
            evaluators: default_evaluators(),
        })
    }

    /// 평가기 목록 교체
    pub fn with_evaluators(mut self, evaluators: Vec<Box<dyn SignalEvaluator>>) -> Self {
        self.evaluators = evaluators;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// 시계열 분석 후 매매 제안 생성
    ///
    /// # Arguments
    /// * `symbol` - 자산 심볼
    /// * `points` - 시간 오름차순 포인트 목록 (비어 있지 않고 가격은 유한한 양수)
    ///
    /// # Returns
    /// * `AnalysisResult<TradingSuggestion>` - 매매 제안 또는 입력 계약 위반 오류
    pub fn analyze(
        &self,
        symbol: &str,
        points: &[HistoricalPoint],
    ) -> AnalysisResult<TradingSuggestion> {
        let config = &self.config;
        let series = PriceSeries::new(points.to_vec())?;
        if series.len() < config.low_confidence_points {
            warn!(
                "{}: 포인트 {}개 - 저신뢰 분석 (권장 {}개 이상)",
                symbol,
                series.len(),
                config.low_confidence_points
            );
        }

        let prices = series.prices();
        let indicators = analyze_technical_indicators(&series, config);
        let patterns = detect_candle_patterns(series.points(), config);
        let sentiment = SentimentAnalyzer::new(config).analyze(
            prices,
            series.volumes(),
            indicators.rsi,
            indicators.histogram,
            &patterns,
        );
        let fibonacci = FibonacciLevels::calculate(series.high(), series.low());
        let rsi_series = calculate_rsi_series(prices, config.rsi_period);
        let divergence = detect_divergence(prices, &rsi_series, config.divergence_window);
        debug!("{}: {}, 다이버전스 {:?}", symbol, fibonacci, divergence);

        let ctx = SignalContext {
            indicators: &indicators,
            patterns: &patterns,
            divergence,
            sentiment: &sentiment,
            fibonacci,
            config,
        };
        let mut decision = resolve(&self.evaluators, &ctx);

        let [w_indicator, w_sentiment, w_pattern, w_divergence] = CONFIDENCE_WEIGHTS;
        let confidence = (calculate_confidence_score(&indicators, config) * w_indicator
            + sentiment.strength * w_sentiment
            + mean_probability(&patterns) * w_pattern
            + divergence.strength * w_divergence)
            .clamp(0.0, 1.0);

        apply_conflict_override(&mut decision, sentiment.sentiment);
        debug!("{}: 결정 {} (근거 {}개)", symbol, decision.action, decision.reasons.len());

        let targets = calculate_targets(
            decision.action,
            indicators.price,
            indicators.volatility,
            sentiment.strength,
            &fibonacci,
        );

        let suggestion = TradingSuggestion {
            symbol: symbol.to_string(),
            action: decision.action,
            confidence,
            reasons: decision.reasons,
            target_price: targets.target_price,
            stop_loss: targets.stop_loss,
            risk: assess_risk(&sentiment, &indicators, &patterns),
            market: market_condition(&sentiment, &indicators),
            indicators,
            valid_until: self.clock.now() + Duration::hours(config.validity_hours),
        };

        info!("분석 완료: {}", suggestion);
        Ok(suggestion)
    }

    /// 데이터 제공자에서 시계열을 가져와 분석
    ///
    /// # Arguments
    /// * `source` - 시세 데이터 제공자
    /// * `symbol` - 자산 심볼
    /// * `days` - 조회 기간 (일)
    pub fn analyze_from_source(
        &self,
        source: &dyn HistoricalDataSource,
        symbol: &str,
        days: u32,
    ) -> AnalysisResult<TradingSuggestion> {
        let points = source.fetch(symbol, days)?;
        debug!("{}: {}일 시계열 {}개 포인트 수신", symbol, days, points.len());
        self.analyze(symbol, &points)
    }
}
