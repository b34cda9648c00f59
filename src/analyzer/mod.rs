// 분석기 모듈
// 지표 스냅샷과 패턴을 심리, 신뢰도, 리스크로 요약합니다.

pub mod confidence_analyzer;
pub mod risk_analyzer;
pub mod sentiment_analyzer;

pub use confidence_analyzer::calculate_confidence_score;
pub use risk_analyzer::{assess_risk, market_condition};
pub use sentiment_analyzer::{MarketSentiment, SentimentAnalyzer};
