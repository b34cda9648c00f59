use crate::error::{AnalysisError, AnalysisResult};
use crate::model::HistoricalPoint;

/// 검증된 시세 시계열
///
/// 시간 오름차순(가장 오래된 데이터가 먼저)으로 정렬된 포인트를 보관합니다.
/// 호출자가 넘긴 구간을 그대로 보관하며 생성 이후에는 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<HistoricalPoint>,
    prices: Vec<f64>,
    volumes: Vec<f64>,
}

impl PriceSeries {
    /// 포인트 목록을 검증하여 새 시계열을 생성합니다.
    ///
    /// # Arguments
    /// * `points` - 시간 오름차순 포인트 목록
    ///
    /// # Returns
    /// * `AnalysisResult<PriceSeries>` - 검증된 시계열 또는 입력 계약 위반 오류
    pub fn new(points: Vec<HistoricalPoint>) -> AnalysisResult<PriceSeries> {
        if points.is_empty() {
            return Err(AnalysisError::EmptySeries);
        }

        for (index, point) in points.iter().enumerate() {
            if !point.price.is_finite() || point.price <= 0.0 {
                return Err(AnalysisError::InvalidPrice {
                    index,
                    price: point.price,
                });
            }
            if !point.volume.is_finite() || point.volume < 0.0 {
                return Err(AnalysisError::InvalidVolume {
                    index,
                    volume: point.volume,
                });
            }
        }

        if let Some(index) = points
            .windows(2)
            .position(|pair| pair[1].timestamp < pair[0].timestamp)
        {
            return Err(AnalysisError::UnorderedTimestamps { index: index + 1 });
        }

        let prices = points.iter().map(|p| p.price).collect();
        let volumes = points.iter().map(|p| p.volume).collect();

        Ok(PriceSeries {
            points,
            prices,
            volumes,
        })
    }

    /// 포인트 수
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 비어 있는지 확인 (검증을 통과한 시계열은 항상 false)
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 전체 포인트 슬라이스
    pub fn points(&self) -> &[HistoricalPoint] {
        &self.points
    }

    /// 가격 슬라이스 (오래된 순)
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// 거래량 슬라이스 (오래된 순)
    pub fn volumes(&self) -> &[f64] {
        &self.volumes
    }

    /// 마지막(현재) 가격
    pub fn last_price(&self) -> f64 {
        self.prices.last().copied().unwrap_or_default()
    }

    /// 구간 최고가
    pub fn high(&self) -> f64 {
        self.prices.iter().copied().fold(f64::MIN, f64::max)
    }

    /// 구간 최저가
    pub fn low(&self) -> f64 {
        self.prices.iter().copied().fold(f64::MAX, f64::min)
    }
}
