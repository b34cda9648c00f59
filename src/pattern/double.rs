use crate::pattern::PatternKind;

/// 이중 천장/바닥 탐지 결과
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoublePattern {
    /// `DoubleTop` 또는 `DoubleBottom`
    pub kind: PatternKind,
    /// 확인 레벨 (천장 사이 최저점 / 바닥 사이 최고점)
    pub confirmation_level: f64,
    /// 무효화 레벨 (두 천장 중 최고점 / 두 바닥 중 최저점)
    pub invalidation_level: f64,
}

/// 인접 두 값보다 엄격히 큰(작은) 인덱스 목록
fn find_extrema(prices: &[f64]) -> (Vec<usize>, Vec<usize>) {
    let mut peaks = Vec::new();
    let mut troughs = Vec::new();

    for i in 1..prices.len().saturating_sub(1) {
        if prices[i] > prices[i - 1] && prices[i] > prices[i + 1] {
            peaks.push(i);
        }
        if prices[i] < prices[i - 1] && prices[i] < prices[i + 1] {
            troughs.push(i);
        }
    }

    (peaks, troughs)
}

/// 연속한 두 극점이 허용 오차 이내이고 충분히 떨어져 있는지
fn is_matching_pair(
    prices: &[f64],
    first: usize,
    second: usize,
    tolerance: f64,
    min_separation: usize,
) -> bool {
    let diff = (prices[first] - prices[second]).abs() / prices[first];
    diff <= tolerance && second - first >= min_separation
}

/// 이중 천장/바닥 탐색
///
/// 연속한 두 국소 최고점(최저점)의 가격 차이가 첫 극점 대비 `tolerance` 이내이고
/// 인덱스 간격이 `min_separation` 이상이면 패턴으로 판단합니다.
/// 이중 천장을 먼저 찾고, 없으면 이중 바닥을 찾습니다. 처음 일치한 쌍만 반환합니다.
///
/// # Arguments
/// * `prices` - 탐색 구간 가격 (오래된 순)
/// * `tolerance` - 상대 허용 오차 (기본 0.02)
/// * `min_separation` - 두 극점 간 최소 인덱스 간격 (기본 5)
pub fn find_double_pattern(
    prices: &[f64],
    tolerance: f64,
    min_separation: usize,
) -> Option<DoublePattern> {
    let (peaks, troughs) = find_extrema(prices);

    for pair in peaks.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        if is_matching_pair(prices, first, second, tolerance, min_separation) {
            let valley = prices[first..second]
                .iter()
                .copied()
                .fold(f64::INFINITY, f64::min);
            return Some(DoublePattern {
                kind: PatternKind::DoubleTop,
                confirmation_level: valley,
                invalidation_level: prices[first].max(prices[second]),
            });
        }
    }

    for pair in troughs.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        if is_matching_pair(prices, first, second, tolerance, min_separation) {
            let peak = prices[first..second]
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max);
            return Some(DoublePattern {
                kind: PatternKind::DoubleBottom,
                confirmation_level: peak,
                invalidation_level: prices[first].min(prices[second]),
            });
        }
    }

    None
}
