use crate::indicator::utils::{finite_or, moving_average, population_std_dev};
use crate::model::BollingerBands;
use std::fmt::Display;

/// 볼린저 밴드 계산
///
/// 중간선은 마지막 `period`개 가격의 평균, 상/하단은 같은 구간의 모표준편차에
/// 승수를 곱해 더하고 뺀 값입니다. 데이터가 `period`보다 적으면 가능한 값 전체를 사용합니다.
///
/// # Arguments
/// * `prices` - 가격 데이터 (오래된 순)
/// * `period` - 계산 기간 (기본 20)
/// * `multiplier` - 표준편차 승수 (기본 2.0)
pub fn calculate_bollinger_bands(prices: &[f64], period: usize, multiplier: f64) -> BollingerBands {
    let last_price = prices.last().copied().unwrap_or_default();
    if prices.is_empty() || period == 0 {
        return BollingerBands {
            upper: last_price,
            middle: last_price,
            lower: last_price,
        };
    }

    let start_idx = prices.len().saturating_sub(period);
    let window = &prices[start_idx..];
    let middle = finite_or(
        moving_average::calculate_trailing_mean(window, period),
        last_price,
    );
    let std_dev = finite_or(population_std_dev(window), 0.0);

    BollingerBands {
        upper: middle + std_dev * multiplier,
        middle,
        lower: middle - std_dev * multiplier,
    }
}

impl BollingerBands {
    /// 가격이 하단 밴드 아래에 있는지 확인
    pub fn is_below_lower(&self, price: f64) -> bool {
        price < self.lower
    }

    /// 가격이 상단 밴드 위에 있는지 확인
    pub fn is_above_upper(&self, price: f64) -> bool {
        price > self.upper
    }
}

impl Display for BollingerBands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BBand(upper: {:.2}, middle: {:.2}, lower: {:.2})",
            self.upper, self.middle, self.lower
        )
    }
}
