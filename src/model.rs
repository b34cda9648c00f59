use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 과거 시세 데이터 포인트
///
/// 시간 오름차순으로 정렬된 `(timestamp, price, volume)` 한 건입니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    /// 시각
    pub timestamp: DateTime<Utc>,
    /// 가격 (양수)
    pub price: f64,
    /// 거래량 (0 이상)
    pub volume: f64,
}

impl HistoricalPoint {
    /// 새 데이터 포인트 생성
    pub fn new(timestamp: DateTime<Utc>, price: f64, volume: f64) -> Self {
        HistoricalPoint {
            timestamp,
            price,
            volume,
        }
    }
}

impl Display for HistoricalPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Point(t={}, p={:.4}, v={:.2})",
            self.timestamp.to_rfc3339(),
            self.price,
            self.volume
        )
    }
}

/// 매매 제안 액션
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    /// 매수
    Buy,
    /// 매도
    Sell,
    /// 관망
    Hold,
}

impl Action {
    /// 반대 방향 액션인지 확인 (HOLD는 어느 쪽과도 반대가 아님)
    pub fn is_opposite_of(&self, other: Action) -> bool {
        matches!(
            (self, other),
            (Action::Buy, Action::Sell) | (Action::Sell, Action::Buy)
        )
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Buy => write!(f, "BUY"),
            Action::Sell => write!(f, "SELL"),
            Action::Hold => write!(f, "HOLD"),
        }
    }
}

/// 시장 심리 라벨
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Bullish,
    Bearish,
    Neutral,
}

impl Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Bullish => write!(f, "BULLISH"),
            SentimentLabel::Bearish => write!(f, "BEARISH"),
            SentimentLabel::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// 변동성 구간
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VolatilityRegime {
    Low,
    Medium,
    High,
}

impl VolatilityRegime {
    /// 변동성 값으로부터 구간 판정 (0.05 초과 HIGH, 0.03 초과 MEDIUM)
    pub fn from_volatility(volatility: f64) -> Self {
        if volatility > 0.05 {
            VolatilityRegime::High
        } else if volatility > 0.03 {
            VolatilityRegime::Medium
        } else {
            VolatilityRegime::Low
        }
    }
}

impl Display for VolatilityRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolatilityRegime::Low => write!(f, "LOW"),
            VolatilityRegime::Medium => write!(f, "MEDIUM"),
            VolatilityRegime::High => write!(f, "HIGH"),
        }
    }
}

/// 리스크 레벨 (변동성 구간과 동일한 3단계)
pub type RiskLevel = VolatilityRegime;

/// 볼린저 밴드 값
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// 지지/저항 레벨과 추세 강도
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceLevels {
    /// 지지선
    pub support_level: f64,
    /// 저항선
    pub resistance_level: f64,
    /// 추세 강도 (0.0-1.0)
    pub trend_strength: f64,
}

/// 기술적 지표 스냅샷
///
/// 입력 구간으로부터 완전히 결정되는 값 객체입니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalIndicators {
    /// 현재 가격 (마지막 포인트)
    pub price: f64,
    pub rsi: f64,
    #[serde(rename = "stochRSI")]
    pub stoch_rsi: f64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub bollinger_bands: BollingerBands,
    pub patterns: PriceLevels,
    pub volatility: f64,
    /// 최근 거래량 / 평균 거래량
    pub volume_ratio: f64,
}

impl TechnicalIndicators {
    /// MACD 라인과 히스토그램이 모두 양수 (상승 모멘텀)
    pub fn has_bullish_macd(&self) -> bool {
        self.histogram > 0.0 && self.macd > 0.0
    }

    /// MACD 라인과 히스토그램이 모두 음수 (하락 모멘텀)
    pub fn has_bearish_macd(&self) -> bool {
        self.histogram < 0.0 && self.macd < 0.0
    }

    /// 가격이 볼린저 하단 아래
    pub fn is_below_band(&self) -> bool {
        self.bollinger_bands.is_below_lower(self.price)
    }

    /// 가격이 볼린저 상단 위
    pub fn is_above_band(&self) -> bool {
        self.bollinger_bands.is_above_upper(self.price)
    }

    /// 모든 필드가 유한한 값인지 확인
    pub fn is_finite(&self) -> bool {
        [
            self.price,
            self.rsi,
            self.stoch_rsi,
            self.macd,
            self.signal,
            self.histogram,
            self.bollinger_bands.upper,
            self.bollinger_bands.middle,
            self.bollinger_bands.lower,
            self.patterns.support_level,
            self.patterns.resistance_level,
            self.patterns.trend_strength,
            self.volatility,
            self.volume_ratio,
        ]
        .iter()
        .all(|value| value.is_finite())
    }
}

/// 리스크 평가
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub score: f64,
    pub factors: Vec<String>,
}

/// 시장 상황 요약
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketCondition {
    pub trend: SentimentLabel,
    pub strength: f64,
    pub volatility: f64,
    pub volume: f64,
}

/// 최종 매매 제안
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSuggestion {
    pub symbol: String,
    pub action: Action,
    /// 신뢰도 (0.0-1.0)
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub target_price: f64,
    pub stop_loss: f64,
    pub risk: RiskAssessment,
    pub market: MarketCondition,
    pub indicators: TechnicalIndicators,
    #[serde(rename = "validUntil")]
    pub valid_until: DateTime<Utc>,
}

impl Display for TradingSuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} (신뢰도: {:.2}, 목표가: {:.2}, 손절가: {:.2})",
            self.symbol, self.action, self.confidence, self.target_price, self.stop_loss
        )
    }
}
