use crate::indicator::ma::sma::calculate_sma;
use crate::indicator::utils::moving_average;

/// 지수이동평균(EMA) 계산
///
/// 첫 `period`개 값의 SMA를 시드로 하고, 이후 값마다
/// `ema = (price - ema) * 2/(period+1) + ema`로 갱신합니다.
///
/// # Arguments
/// * `prices` - 가격 데이터 (오래된 순)
/// * `period` - EMA 기간
///
/// # Returns
/// * `f64` - EMA 값 (데이터가 부족하면 0.0)
pub fn calculate_ema(prices: &[f64], period: usize) -> f64 {
    calculate_ema_series(prices, period)
        .last()
        .copied()
        .unwrap_or(0.0)
}

/// 각 인덱스의 EMA 값 목록
///
/// 반환 값의 첫 항목은 인덱스 `period - 1`(시드 SMA)에 대응합니다.
/// 데이터가 부족하면 빈 벡터를 반환합니다.
pub fn calculate_ema_series(prices: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || prices.len() < period {
        return Vec::new();
    }

    let alpha = moving_average::calculate_ema_alpha(period);
    let mut ema = calculate_sma(&prices[..period], period);
    let mut series = Vec::with_capacity(prices.len() - period + 1);
    series.push(ema);

    for &price in &prices[period..] {
        ema = moving_average::calculate_ema_step(price, ema, alpha);
        series.push(ema);
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_seed_is_sma() {
        let prices = [2.0, 4.0, 6.0];
        assert_eq!(calculate_ema(&prices, 3), 4.0);
    }

    #[test]
    fn test_ema_recurrence() {
        // 시드 4.0, 알파 0.5 -> (10 - 4) * 0.5 + 4 = 7
        let prices = [2.0, 4.0, 6.0, 10.0];
        assert!((calculate_ema(&prices, 3) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_ema_period_longer_than_data() {
        assert_eq!(calculate_ema(&[1.0, 2.0, 3.0], 5), 0.0);
        assert!(calculate_ema_series(&[1.0, 2.0, 3.0], 5).is_empty());
    }

    #[test]
    fn test_ema_series_length() {
        let prices: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        assert_eq!(calculate_ema_series(&prices, 4).len(), 7);
    }
}
