// 기술적 지표 모듈
// 가격 시계열에 대한 상태 없는 수치 지표 함수를 제공합니다.

pub mod bband;
pub mod ma;
pub mod macd;
pub mod rsi;
pub mod support_resistance;
pub mod utils;
pub mod volatility;
pub mod volume;

use crate::config::AnalysisConfig;
use crate::indicator::bband::calculate_bollinger_bands;
use crate::indicator::macd::{MACD, MACDParams};
use crate::indicator::rsi::{RSI, calculate_stoch_rsi};
use crate::indicator::support_resistance::calculate_support_resistance;
use crate::indicator::utils::finite_or;
use crate::indicator::volatility::calculate_volatility;
use crate::indicator::volume::calculate_volume_ratio;
use crate::model::TechnicalIndicators;
use crate::series::PriceSeries;

impl From<&AnalysisConfig> for MACDParams {
    fn from(config: &AnalysisConfig) -> Self {
        MACDParams {
            fast_period: config.macd_fast,
            slow_period: config.macd_slow,
            signal_period: config.macd_signal,
        }
    }
}

/// 시계열 전체로부터 기술적 지표 스냅샷 생성
///
/// 데이터가 부족한 지표는 각자의 기본값(0, 50, 기본 변동성)으로 대체되며
/// 오류를 반환하지 않습니다.
///
/// # Arguments
/// * `series` - 검증된 시세 시계열
/// * `config` - 지표 기간/파라미터 설정
///
/// # Returns
/// * `TechnicalIndicators` - 모든 필드가 유한한 지표 스냅샷
pub fn analyze_technical_indicators(
    series: &PriceSeries,
    config: &AnalysisConfig,
) -> TechnicalIndicators {
    let prices = series.prices();
    let price = series.last_price();
    let substituted = insufficient_windows(prices.len(), config);
    if !substituted.is_empty() {
        log::warn!(
            "포인트 {}개로는 {} 계산 불가 - 기본값 사용",
            prices.len(),
            substituted.join(", ")
        );
    }

    let rsi = RSI::from_prices(prices, config.rsi_period);
    let macd = MACD::calculate(prices, MACDParams::from(config), config.signal_line);

    let snapshot = TechnicalIndicators {
        price,
        rsi: rsi.value(),
        stoch_rsi: calculate_stoch_rsi(prices, config.stoch_rsi_period),
        macd: macd.macd_line,
        signal: macd.signal_line,
        histogram: macd.histogram,
        bollinger_bands: calculate_bollinger_bands(
            prices,
            config.bollinger_period,
            config.bollinger_multiplier,
        ),
        patterns: calculate_support_resistance(prices, config.support_resistance_lookback),
        volatility: finite_or(
            calculate_volatility(prices, config.volatility_period, config.default_volatility),
            config.default_volatility,
        ),
        volume_ratio: calculate_volume_ratio(series.volumes()),
    };

    log::debug!(
        "지표 스냅샷: {}, {}, {}, 변동성={:.4}",
        rsi,
        macd,
        snapshot.bollinger_bands,
        snapshot.volatility
    );

    snapshot
}

/// 데이터가 부족해 기본값으로 대체되는 지표 이름
fn insufficient_windows(len: usize, config: &AnalysisConfig) -> Vec<&'static str> {
    let windows = [
        ("RSI", config.rsi_period + 1),
        ("StochRSI", config.stoch_rsi_period + 1),
        ("MACD", config.macd_slow),
        ("변동성", config.volatility_period),
    ];
    windows
        .iter()
        .filter(|(_, required)| len < *required)
        .map(|(name, _)| *name)
        .collect()
}
