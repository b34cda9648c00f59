use crate::indicator::utils::{mean, safe_div};
use std::fmt::Display;

/// 최근 거래량 비교 구간
const RECENT_VOLUME_WINDOW: usize = 5;

/// 거래량 비율 계산 (마지막 거래량 / 전체 평균 거래량)
///
/// # Returns
/// * `f64` - 거래량 비율, 평균 거래량이 0이면 1.0
pub fn calculate_volume_ratio(volumes: &[f64]) -> f64 {
    let avg_volume = mean(volumes);
    if avg_volume == 0.0 {
        return 1.0;
    }
    volumes.last().copied().unwrap_or_default() / avg_volume
}

/// 거래량 프로파일
///
/// 가격 변화 방향별로 정규화된 거래량을 누적한 매수/매도 압력과
/// 최근 거래량 변화율입니다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeProfile {
    /// 매수 압력 (상승 구간의 정규화 거래량 * |가격 변화| 합)
    pub buying_pressure: f64,
    /// 매도 압력 (하락/보합 구간의 정규화 거래량 * |가격 변화| 합)
    pub selling_pressure: f64,
    /// 최근 5개 평균 거래량의 이전 구간 대비 변화율
    pub volume_change: f64,
}

impl Display for VolumeProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "VolumeProfile(buy={:.2}, sell={:.2}, change={:.2})",
            self.buying_pressure, self.selling_pressure, self.volume_change
        )
    }
}

impl VolumeProfile {
    /// 가격/거래량 시계열로부터 프로파일 계산
    ///
    /// # Arguments
    /// * `prices` - 가격 데이터 (오래된 순)
    /// * `volumes` - 거래량 데이터 (가격과 같은 길이)
    pub fn analyze(prices: &[f64], volumes: &[f64]) -> Self {
        let max_volume = volumes.iter().copied().fold(0.0, f64::max);

        let mut buying_pressure = 0.0;
        let mut selling_pressure = 0.0;
        for (i, pair) in prices.windows(2).enumerate() {
            let price_change = pair[1] - pair[0];
            let volume = volumes.get(i + 1).copied().unwrap_or_default();
            let weighted = safe_div(volume, max_volume) * price_change.abs();

            if price_change > 0.0 {
                buying_pressure += weighted;
            } else {
                selling_pressure += weighted;
            }
        }

        VolumeProfile {
            buying_pressure,
            selling_pressure,
            volume_change: calculate_volume_change(volumes),
        }
    }

    /// 매수 압력 우위
    pub fn is_buying_dominant(&self) -> bool {
        self.buying_pressure > self.selling_pressure
    }

    /// 매도 압력 우위
    pub fn is_selling_dominant(&self) -> bool {
        self.selling_pressure > self.buying_pressure
    }
}

/// 최근 거래량 변화율 - 비교 구간이 없거나 이전 평균이 0이면 0
fn calculate_volume_change(volumes: &[f64]) -> f64 {
    if volumes.len() <= RECENT_VOLUME_WINDOW {
        return 0.0;
    }

    let split_idx = volumes.len() - RECENT_VOLUME_WINDOW;
    let historical = mean(&volumes[..split_idx]);
    if historical == 0.0 {
        return 0.0;
    }

    (mean(&volumes[split_idx..]) - historical) / historical
}
