use crate::indicator::utils::{population_std_dev, relative_returns};

/// 데이터 부족 시 기본 변동성
pub const DEFAULT_VOLATILITY: f64 = 0.02;

/// 역사적 변동성 계산
///
/// 마지막 `period + 1`개 가격(최대 `period`개의 수익률)에서 인접 가격 간
/// 상대 수익률의 모표준편차를 구합니다. 수익률 기반이므로 가격 스케일에 무관합니다.
///
/// # Arguments
/// * `prices` - 가격 데이터 (오래된 순)
/// * `period` - 계산 기간 (기본 20)
/// * `default_volatility` - 가격이 `period`개 미만일 때 반환할 값
pub fn calculate_volatility(prices: &[f64], period: usize, default_volatility: f64) -> f64 {
    if period == 0 || prices.len() < period {
        return default_volatility;
    }

    let start_idx = prices.len().saturating_sub(period + 1);
    let returns = relative_returns(&prices[start_idx..]);
    population_std_dev(&returns)
}
