use crate::indicator::utils::relative_change;
use crate::model::PriceLevels;

/// 지지/저항 탐색 기본 구간
pub const DEFAULT_LOOKBACK: usize = 50;

/// 지지/저항 레벨과 추세 강도 계산
///
/// 마지막 `lookback`개 가격에서 양옆 이웃보다 엄격히 작은(큰) 지점을 국소 최저(최고)로 보고,
/// 지지선은 국소 최저값들의 최소, 저항선은 국소 최고값들의 최대입니다.
/// 국소 극값이 없으면 현재가의 0.95배 / 1.05배를 사용합니다.
/// 추세 강도는 전체 구간 상대 변화율의 절대값 (최대 1).
///
/// # Arguments
/// * `prices` - 가격 데이터 (오래된 순)
/// * `lookback` - 극값 탐색 구간
pub fn calculate_support_resistance(prices: &[f64], lookback: usize) -> PriceLevels {
    let current_price = prices.last().copied().unwrap_or_default();
    let recent = &prices[prices.len().saturating_sub(lookback)..];

    let mut support: Option<f64> = None;
    let mut resistance: Option<f64> = None;

    // 양끝 두 개는 제외하고 스캔
    for i in 2..recent.len().saturating_sub(2) {
        let (prev, curr, next) = (recent[i - 1], recent[i], recent[i + 1]);
        if curr < prev && curr < next {
            support = Some(support.map_or(curr, |s| s.min(curr)));
        }
        if curr > prev && curr > next {
            resistance = Some(resistance.map_or(curr, |r| r.max(curr)));
        }
    }

    PriceLevels {
        support_level: support.unwrap_or(current_price * 0.95),
        resistance_level: resistance.unwrap_or(current_price * 1.05),
        trend_strength: relative_change(prices).abs().min(1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_levels_without_extrema() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let levels = calculate_support_resistance(&prices, DEFAULT_LOOKBACK);
        assert!((levels.support_level - 129.0 * 0.95).abs() < 1e-9);
        assert!((levels.resistance_level - 129.0 * 1.05).abs() < 1e-9);
        assert!((levels.trend_strength - 0.29).abs() < 1e-9);
    }

    #[test]
    fn test_local_extrema() {
        let prices = [10.0, 11.0, 12.0, 9.0, 13.0, 15.0, 14.0, 8.0, 12.0, 13.0, 14.0];
        let levels = calculate_support_resistance(&prices, DEFAULT_LOOKBACK);
        assert_eq!(levels.support_level, 8.0);
        assert_eq!(levels.resistance_level, 15.0);
    }

    #[test]
    fn test_trend_strength_capped_at_one() {
        let prices = [10.0, 12.0, 15.0, 40.0];
        let levels = calculate_support_resistance(&prices, DEFAULT_LOOKBACK);
        assert_eq!(levels.trend_strength, 1.0);
    }

    #[test]
    fn test_only_lookback_window_is_scanned() {
        let mut prices = vec![100.0, 1.0, 100.0, 100.0, 100.0];
        prices.extend((0..60).map(|i| 100.0 + i as f64));
        let levels = calculate_support_resistance(&prices, DEFAULT_LOOKBACK);
        // 1.0 저점은 마지막 50개 밖
        assert!(levels.support_level > 100.0);
    }
}
