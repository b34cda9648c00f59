/// 공통 이동평균 계산 함수들
pub mod moving_average {
    /// 구간 평균 계산 - 데이터가 period보다 적으면 가능한 값 전체의 평균
    ///
    /// # Arguments
    /// * `values` - 가격 데이터 배열
    /// * `period` - 계산 기간
    ///
    /// # Returns
    /// * `f64` - 평균 값 (빈 데이터거나 period가 0이면 0.0)
    pub fn calculate_trailing_mean(values: &[f64], period: usize) -> f64 {
        if values.is_empty() || period == 0 {
            return 0.0;
        }

        let start_idx = values.len().saturating_sub(period);
        let slice = &values[start_idx..];
        slice.iter().sum::<f64>() / slice.len() as f64
    }

    /// 지수이동평균(EMA) 계산을 위한 알파값 계산
    ///
    /// # Arguments
    /// * `period` - EMA 기간
    ///
    /// # Returns
    /// * `f64` - 알파값 (평활화 계수)
    pub fn calculate_ema_alpha(period: usize) -> f64 {
        2.0 / (period + 1) as f64
    }

    /// 지수이동평균(EMA) 한 스텝 계산
    ///
    /// # Arguments
    /// * `current_price` - 현재 가격
    /// * `previous_ema` - 이전 EMA 값
    /// * `alpha` - 평활화 계수
    ///
    /// # Returns
    /// * `f64` - 계산된 EMA 값
    pub fn calculate_ema_step(current_price: f64, previous_ema: f64, alpha: f64) -> f64 {
        (current_price - previous_ema) * alpha + previous_ema
    }
}

/// 산술 평균 (빈 슬라이스는 0.0)
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// 모표준편차 (빈 슬라이스는 0.0)
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let avg = mean(values);
    let variance = values
        .iter()
        .map(|&x| {
            let diff = x - avg;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64;

    variance.sqrt()
}

/// 분모가 0일 수 있는 나눗셈 - 분모가 0이면 1로 대체
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        numerator
    } else {
        numerator / denominator
    }
}

/// 첫 값 대비 마지막 값의 상대 변화율 (첫 값이 0이면 분모 1)
pub fn relative_change(values: &[f64]) -> f64 {
    match (values.first(), values.last()) {
        (Some(&first), Some(&last)) => safe_div(last - first, first),
        _ => 0.0,
    }
}

/// 인접 값 간 상대 변화율 목록
pub fn relative_returns(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .map(|pair| safe_div(pair[1] - pair[0], pair[0]))
        .collect()
}

/// 부호 함수 (0은 0)
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// 소수점 둘째 자리 반올림
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 유한하지 않은 값을 기본값으로 대체
pub fn finite_or(value: f64, default_value: f64) -> f64 {
    if value.is_finite() { value } else { default_value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_mean_uses_available_values() {
        assert_eq!(moving_average::calculate_trailing_mean(&[1.0, 2.0, 3.0], 2), 2.5);
        assert_eq!(moving_average::calculate_trailing_mean(&[1.0, 2.0, 3.0], 10), 2.0);
        assert_eq!(moving_average::calculate_trailing_mean(&[], 10), 0.0);
    }

    #[test]
    fn test_population_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_std_dev(&values) - 2.0).abs() < 1e-12);
        assert_eq!(population_std_dev(&[5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn test_safe_div_zero_denominator() {
        assert_eq!(safe_div(3.0, 0.0), 3.0);
        assert_eq!(safe_div(3.0, 2.0), 1.5);
    }

    #[test]
    fn test_relative_change() {
        assert!((relative_change(&[100.0, 110.0]) - 0.1).abs() < 1e-12);
        assert_eq!(relative_change(&[0.0, 5.0]), 5.0);
        assert_eq!(relative_change(&[]), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(45225.005_1), 45225.01);
    }
}
