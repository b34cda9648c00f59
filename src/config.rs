use crate::config_loader::{ConfigError, ConfigResult, ConfigValidation};
use crate::indicator::macd::SignalLineMode;
use serde::{Deserialize, Serialize};

/// 분석 엔진 설정
///
/// 모든 기간, 임계값을 한곳에 모은 설정입니다. 기본값은 표준 파라미터
/// (RSI 14, MACD 12/26/9, 볼린저 20/2 등)를 따릅니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// RSI 계산 기간
    pub rsi_period: usize,
    /// Stochastic RSI 계산 기간
    pub stoch_rsi_period: usize,
    /// MACD 빠른 EMA 기간
    pub macd_fast: usize,
    /// MACD 느린 EMA 기간
    pub macd_slow: usize,
    /// MACD 시그널 기간
    pub macd_signal: usize,
    /// MACD 시그널 라인 계산 방식
    pub signal_line: SignalLineMode,
    /// 볼린저 밴드 기간
    pub bollinger_period: usize,
    /// 볼린저 밴드 표준편차 승수
    pub bollinger_multiplier: f64,
    /// 변동성 계산 기간
    pub volatility_period: usize,
    /// 데이터 부족 시 사용할 기본 변동성
    pub default_volatility: f64,
    /// 지지/저항 탐색 구간
    pub support_resistance_lookback: usize,
    /// 패턴 스캔 시작 인덱스
    pub pattern_start_index: usize,
    /// 이중 천장/바닥 탐색 구간
    pub double_pattern_lookback: usize,
    /// 이중 천장/바닥 가격 허용 오차 (상대값)
    pub double_pattern_tolerance: f64,
    /// 이중 천장/바닥 두 극점 간 최소 간격
    pub double_pattern_min_separation: usize,
    /// 다이버전스 비교 구간
    pub divergence_window: usize,
    /// 강한 패턴으로 판단할 확률 기준
    pub strong_pattern_probability: f64,
    /// 강한 다이버전스로 판단할 강도 기준
    pub strong_divergence_strength: f64,
    /// RSI 과매도 기준
    pub rsi_oversold: f64,
    /// RSI 과매수 기준
    pub rsi_overbought: f64,
    /// 거래량 확인 기준 배수
    pub volume_confirmation_ratio: f64,
    /// 이보다 짧은 시계열은 저신뢰 결과로 취급
    pub low_confidence_points: usize,
    /// 제안 유효 시간 (시간 단위)
    pub validity_hours: i64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            rsi_period: 14,
            stoch_rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            signal_line: SignalLineMode::Rolling,
            bollinger_period: 20,
            bollinger_multiplier: 2.0,
            volatility_period: 20,
            default_volatility: 0.02,
            support_resistance_lookback: 50,
            pattern_start_index: 20,
            double_pattern_lookback: 30,
            double_pattern_tolerance: 0.02,
            double_pattern_min_separation: 5,
            divergence_window: 10,
            strong_pattern_probability: 0.7,
            strong_divergence_strength: 0.7,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            volume_confirmation_ratio: 1.5,
            low_confidence_points: 50,
            validity_hours: 24,
        }
    }
}

impl ConfigValidation for AnalysisConfig {
    fn validate(&self) -> ConfigResult<()> {
        let periods = [
            ("rsi_period", self.rsi_period),
            ("stoch_rsi_period", self.stoch_rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("bollinger_period", self.bollinger_period),
            ("volatility_period", self.volatility_period),
            ("support_resistance_lookback", self.support_resistance_lookback),
            ("double_pattern_lookback", self.double_pattern_lookback),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ValidationError(format!(
                "{}는 0보다 커야 합니다",
                name
            )));
        }

        if self.divergence_window < 2 {
            return Err(ConfigError::ValidationError(
                "divergence_window는 2 이상이어야 합니다".to_string(),
            ));
        }

        if self.macd_fast >= self.macd_slow {
            return Err(ConfigError::ValidationError(format!(
                "MACD 빠른 기간({})은 느린 기간({})보다 작아야 합니다",
                self.macd_fast, self.macd_slow
            )));
        }

        if self.rsi_oversold >= self.rsi_overbought {
            return Err(ConfigError::ValidationError(format!(
                "RSI 과매도 기준({})은 과매수 기준({})보다 작아야 합니다",
                self.rsi_oversold, self.rsi_overbought
            )));
        }

        if self.bollinger_multiplier <= 0.0 || self.default_volatility <= 0.0 {
            return Err(ConfigError::ValidationError(
                "볼린저 승수와 기본 변동성은 양수여야 합니다".to_string(),
            ));
        }

        if !(self.double_pattern_tolerance > 0.0 && self.double_pattern_tolerance < 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "이중 패턴 허용 오차는 (0, 1) 범위여야 합니다: {}",
                self.double_pattern_tolerance
            )));
        }

        if self.validity_hours <= 0 {
            return Err(ConfigError::ValidationError(
                "validity_hours는 양수여야 합니다".to_string(),
            ));
        }

        Ok(())
    }
}
