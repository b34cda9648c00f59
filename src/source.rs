use crate::error::{AnalysisError, AnalysisResult};
use crate::model::HistoricalPoint;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::path::PathBuf;

/// 시세 데이터 제공자
///
/// 엔진은 분석 전에 이 인터페이스로 시계열을 동기적으로 가져옵니다.
/// 캐시, 재시도, 타임아웃은 구현체의 책임입니다.
pub trait HistoricalDataSource: Send + Sync {
    /// 심볼의 최근 `days`일 시계열 (시간 오름차순)
    fn fetch(&self, symbol: &str, days: u32) -> AnalysisResult<Vec<HistoricalPoint>>;
}

/// 마지막 포인트 기준 최근 `days`일 구간만 남김
fn retain_recent_days(points: &[HistoricalPoint], days: u32) -> Vec<HistoricalPoint> {
    let Some(last) = points.last() else {
        return Vec::new();
    };
    let cutoff = last.timestamp - Duration::days(i64::from(days));
    points
        .iter()
        .filter(|p| p.timestamp >= cutoff)
        .copied()
        .collect()
}

/// 메모리에 보관한 시계열 제공자 (테스트, 오프라인 분석용)
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    series: HashMap<String, Vec<HistoricalPoint>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 심볼 시계열 등록 (기존 값 대체)
    pub fn insert(&mut self, symbol: &str, points: Vec<HistoricalPoint>) {
        self.series.insert(symbol.to_string(), points);
    }

    pub fn with_series(mut self, symbol: &str, points: Vec<HistoricalPoint>) -> Self {
        self.insert(symbol, points);
        self
    }
}

impl HistoricalDataSource for InMemorySource {
    fn fetch(&self, symbol: &str, days: u32) -> AnalysisResult<Vec<HistoricalPoint>> {
        let points = self
            .series
            .get(symbol)
            .ok_or_else(|| AnalysisError::DataSource {
                symbol: symbol.to_string(),
                reason: "등록되지 않은 심볼".to_string(),
            })?;
        Ok(retain_recent_days(points, days))
    }
}

/// `{dir}/{symbol}.json` 파일에서 시계열을 읽는 제공자
///
/// 파일은 `HistoricalPoint` 배열 JSON입니다.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileSource { dir: dir.into() }
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.json", symbol))
    }
}

impl HistoricalDataSource for JsonFileSource {
    fn fetch(&self, symbol: &str, days: u32) -> AnalysisResult<Vec<HistoricalPoint>> {
        let path = self.path_for(symbol);
        log::debug!("시계열 파일 로드: {}", path.display());

        let data_source_error = |reason: String| AnalysisError::DataSource {
            symbol: symbol.to_string(),
            reason,
        };

        let content = std::fs::read_to_string(&path)
            .map_err(|e| data_source_error(format!("{}: {}", path.display(), e)))?;
        let points: Vec<HistoricalPoint> = serde_json::from_str(&content)
            .map_err(|e| data_source_error(format!("JSON 파싱 실패: {}", e)))?;

        Ok(retain_recent_days(&points, days))
    }
}

/// 현재 시각 제공자
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// 시스템 시계
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 고정 시계 (재현 가능한 결과용)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
