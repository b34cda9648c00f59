use crate::config_loader::ConfigError;

/// 분석 엔진 경계에서 발생하는 오류
///
/// 지표 계산 자체는 오류를 반환하지 않고 기본값으로 대체됩니다.
/// 입력 계약 위반과 외부 협력자 실패만 이 타입으로 전달됩니다.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// 빈 시계열
    #[error("시계열이 비어 있습니다")]
    EmptySeries,

    /// 유효하지 않은 가격 (유한한 양수가 아님)
    #[error("인덱스 {index}의 가격이 유효하지 않습니다: {price}")]
    InvalidPrice { index: usize, price: f64 },

    /// 유효하지 않은 거래량 (유한한 0 이상 값이 아님)
    #[error("인덱스 {index}의 거래량이 유효하지 않습니다: {volume}")]
    InvalidVolume { index: usize, volume: f64 },

    /// 시간 순서가 맞지 않음
    #[error("인덱스 {index}의 타임스탬프가 이전 포인트보다 앞섭니다")]
    UnorderedTimestamps { index: usize },

    /// 시세 데이터 조회 실패
    #[error("시세 데이터 조회 실패 ({symbol}): {reason}")]
    DataSource { symbol: String, reason: String },

    /// 설정 오류
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// 분석 결과 타입
pub type AnalysisResult<T> = Result<T, AnalysisError>;
