use std::fmt::Display;

/// 데이터 부족 시 사용하는 중립 RSI 값
pub const NEUTRAL_RSI: f64 = 50.0;

/// RSI 계산 함수
///
/// 마지막 `period`개 가격 변화량에 대해 고정 구간 평균(와일더 평활 아님)으로
/// 평균 상승폭/하락폭을 구합니다.
///
/// 평균 하락폭이 0인 경우:
/// * 평균 상승폭이 양수면 100 (연속 상승)
/// * 평균 상승폭도 0이면 중립값 50 (횡보)
///
/// # Arguments
/// * `prices` - 가격 데이터 (오래된 순)
/// * `period` - RSI 계산 기간 (일반적으로 14)
///
/// # Returns
/// * `f64` - RSI 값 (0-100), 가격이 `period + 1`개 미만이면 50
pub fn calculate_rsi(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period + 1 {
        return NEUTRAL_RSI;
    }

    let window = &prices[prices.len() - period - 1..];
    let (gain_sum, loss_sum) = window
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold((0.0, 0.0), |(gain, loss), change| {
            if change > 0.0 {
                (gain + change, loss)
            } else {
                (gain, loss - change)
            }
        });

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if avg_loss == 0.0 {
        return if avg_gain > 0.0 { 100.0 } else { NEUTRAL_RSI };
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// 각 인덱스에서 그 시점까지의 가격으로 계산한 RSI 시계열
///
/// 반환 길이는 입력 길이와 같고, 데이터가 부족한 초기 구간은 50입니다.
pub fn calculate_rsi_series(prices: &[f64], period: usize) -> Vec<f64> {
    (0..prices.len())
        .map(|i| calculate_rsi(&prices[..=i], period))
        .collect()
}

/// Stochastic RSI 계산
///
/// 인덱스 `period`부터 각 시점에 대해 `prices[i - period ..= i]`(변화량 `period`개)로
/// 롤링 RSI를 구하고, 그 최소/최대 대비 최신 RSI의 위치를 백분율로 반환합니다.
///
/// # Returns
/// * `f64` - StochRSI (0-100), 롤링 RSI가 없거나 최소값과 최대값이 같으면 50
pub fn calculate_stoch_rsi(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() <= period {
        return NEUTRAL_RSI;
    }

    let rsi_values: Vec<f64> = (period..prices.len())
        .map(|i| calculate_rsi(&prices[i - period..=i], period))
        .collect();

    let min_rsi = rsi_values.iter().copied().fold(f64::INFINITY, f64::min);
    let max_rsi = rsi_values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let current_rsi = rsi_values.last().copied().unwrap_or(NEUTRAL_RSI);

    if max_rsi - min_rsi == 0.0 {
        log::warn!("StochRSI 구간이 평탄함 - 중립값 {} 사용", NEUTRAL_RSI);
        return NEUTRAL_RSI;
    }

    (current_rsi - min_rsi) / (max_rsi - min_rsi) * 100.0
}

/// 상대강도지수(RSI) 값
///
/// RSI는 가격 변동의 상대적 강도를 측정하여 과매수/과매도 상태를 판단
#[derive(Clone, Debug, PartialEq)]
pub struct RSI {
    /// RSI 계산 기간
    period: usize,
    /// RSI 값 (0-100)
    pub value: f64,
}

impl Display for RSI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({}: {:.2})", self.period, self.value)
    }
}

impl RSI {
    /// 가격 데이터로부터 RSI 생성
    pub fn from_prices(prices: &[f64], period: usize) -> Self {
        RSI {
            period,
            value: calculate_rsi(prices, period),
        }
    }

    /// RSI 값 반환
    pub fn value(&self) -> f64 {
        self.value
    }
}
