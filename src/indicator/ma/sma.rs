/// 단순이동평균(SMA) 계산
///
/// 마지막 `period`개 값의 산술 평균입니다.
///
/// # Arguments
/// * `prices` - 가격 데이터 (오래된 순)
/// * `period` - 계산 기간
///
/// # Returns
/// * `f64` - SMA 값 (데이터가 부족하거나 period가 0이면 "계산 불가" 의미의 0.0)
pub fn calculate_sma(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period {
        return 0.0;
    }

    let start_idx = prices.len() - period;
    prices[start_idx..].iter().sum::<f64>() / period as f64
}
