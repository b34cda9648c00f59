use crate::indicator::ma::{calculate_ema, calculate_ema_series};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// MACD 시그널 라인 계산 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalLineMode {
    /// MACD 시계열의 EMA (SMA 시드). MACD 값이 시그널 기간보다 적으면 `SinglePoint`로 대체
    Rolling,
    /// 단일 MACD 값에 대한 EMA. 값이 하나뿐이라 시그널은 항상 0 (히스토그램 = MACD)
    SinglePoint,
}

/// MACD 파라미터
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MACDParams {
    /// 빠른 EMA 기간 (일반적으로 12)
    pub fast_period: usize,
    /// 느린 EMA 기간 (일반적으로 26)
    pub slow_period: usize,
    /// 시그널 라인 기간 (일반적으로 9)
    pub signal_period: usize,
}

impl Default for MACDParams {
    fn default() -> Self {
        MACDParams {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// MACD(Moving Average Convergence Divergence) 기술적 지표
///
/// MACD는 추세 추종 모멘텀 지표로, 추세의 방향과 강도를 나타냅니다.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MACD {
    params: MACDParams,
    /// MACD 라인 (빠른 EMA - 느린 EMA)
    pub macd_line: f64,
    /// 시그널 라인
    pub signal_line: f64,
    /// 히스토그램 (MACD - 시그널)
    pub histogram: f64,
}

impl Display for MACD {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD({},{},{}: {:.2}, {:.2}, {:.2})",
            self.params.fast_period,
            self.params.slow_period,
            self.params.signal_period,
            self.macd_line,
            self.signal_line,
            self.histogram
        )
    }
}

impl MACD {
    /// 가격 데이터로부터 MACD 계산
    ///
    /// MACD 라인은 `EMA(fast) - EMA(slow)`이며, 각 EMA는 데이터가 부족하면 0을 돌려주므로
    /// 짧은 시계열에서는 MACD 라인이 빠른 EMA 값 그대로가 될 수 있습니다.
    ///
    /// # Arguments
    /// * `prices` - 가격 데이터 (오래된 순)
    /// * `params` - MACD 기간 파라미터
    /// * `mode` - 시그널 라인 계산 방식
    pub fn calculate(prices: &[f64], params: MACDParams, mode: SignalLineMode) -> MACD {
        let macd_line =
            calculate_ema(prices, params.fast_period) - calculate_ema(prices, params.slow_period);

        let signal_line = match mode {
            SignalLineMode::SinglePoint => single_point_signal(macd_line, params.signal_period),
            SignalLineMode::Rolling => {
                let history = macd_history(prices, params);
                if history.len() >= params.signal_period {
                    calculate_ema(&history, params.signal_period)
                } else {
                    single_point_signal(macd_line, params.signal_period)
                }
            }
        };

        MACD {
            params,
            macd_line,
            signal_line,
            histogram: macd_line - signal_line,
        }
    }
}

/// 단일 값 시계열에 대한 EMA - 기간이 1보다 크면 데이터 부족으로 0
fn single_point_signal(macd_line: f64, signal_period: usize) -> f64 {
    calculate_ema(&[macd_line], signal_period)
}

/// 느린 EMA가 정의되는 모든 인덱스의 MACD 라인 시계열
fn macd_history(prices: &[f64], params: MACDParams) -> Vec<f64> {
    let slow = calculate_ema_series(prices, params.slow_period);
    if slow.is_empty() {
        return Vec::new();
    }

    let fast = calculate_ema_series(prices, params.fast_period);
    // fast[k]는 인덱스 fast_period-1+k, slow[k]는 인덱스 slow_period-1+k
    let offset = params.slow_period.saturating_sub(params.fast_period);
    slow.iter()
        .enumerate()
        .filter_map(|(k, slow_ema)| fast.get(k + offset).map(|fast_ema| fast_ema - slow_ema))
        .collect()
}
