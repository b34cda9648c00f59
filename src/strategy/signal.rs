use crate::analyzer::MarketSentiment;
use crate::config::AnalysisConfig;
use crate::model::{Action, SentimentLabel, TechnicalIndicators};
use crate::pattern::divergence::{Divergence, DivergenceKind};
use crate::pattern::fibonacci::FibonacciLevels;
use crate::pattern::{CandlePattern, PatternDirection};

/// 시그널 평가에 필요한 분석 결과 묶음
#[derive(Debug, Clone, Copy)]
pub struct SignalContext<'a> {
    pub indicators: &'a TechnicalIndicators,
    pub patterns: &'a [CandlePattern],
    pub divergence: Divergence,
    pub sentiment: &'a MarketSentiment,
    pub fibonacci: FibonacciLevels,
    pub config: &'a AnalysisConfig,
}

/// 제안 액션의 우선순위
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// 현재 액션을 무조건 덮어씀
    Override,
    /// 현재 액션이 반대 방향이 아닐 때만 적용
    Confirm,
}

/// 개별 시그널의 제안
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    /// 제안 액션 (None이면 설명만 추가)
    pub action: Option<Action>,
    pub priority: Priority,
    pub reason: String,
}

impl Proposal {
    pub fn overriding(action: Action, reason: String) -> Self {
        Proposal {
            action: Some(action),
            priority: Priority::Override,
            reason,
        }
    }

    pub fn confirming(action: Action, reason: String) -> Self {
        Proposal {
            action: Some(action),
            priority: Priority::Confirm,
            reason,
        }
    }

    pub fn note(reason: String) -> Self {
        Proposal {
            action: None,
            priority: Priority::Confirm,
            reason,
        }
    }

    /// 현재 액션에 제안을 적용한 결과
    pub fn apply(&self, current: Action) -> Action {
        match (self.action, self.priority) {
            (None, _) => current,
            (Some(action), Priority::Override) => action,
            (Some(action), Priority::Confirm) if action.is_opposite_of(current) => current,
            (Some(action), Priority::Confirm) => action,
        }
    }
}

/// 시그널 평가기
///
/// 평가기는 순서대로 실행되며, 앞선 평가기까지 결정된 액션을 입력으로 받습니다.
pub trait SignalEvaluator: Send + Sync {
    /// 평가기 이름 (로그용)
    fn name(&self) -> &'static str;

    /// 제안 목록 생성
    ///
    /// # Arguments
    /// * `ctx` - 분석 결과
    /// * `current` - 현재까지 결정된 액션
    fn evaluate(&self, ctx: &SignalContext<'_>, current: Action) -> Vec<Proposal>;
}

/// 확률이 높은 방향성 패턴 (마지막 패턴이 우선)
#[derive(Debug, Default)]
pub struct PatternSignal;

impl SignalEvaluator for PatternSignal {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn evaluate(&self, ctx: &SignalContext<'_>, _current: Action) -> Vec<Proposal> {
        ctx.patterns
            .iter()
            .filter(|p| p.probability > ctx.config.strong_pattern_probability)
            .filter_map(|p| {
                let action = match p.direction {
                    PatternDirection::Bullish => Action::Buy,
                    PatternDirection::Bearish => Action::Sell,
                    PatternDirection::Neutral => return None,
                };
                Some(Proposal::overriding(
                    action,
                    format!(
                        "Strong {} pattern detected ({:.1}% confidence)",
                        p.pattern,
                        p.probability * 100.0
                    ),
                ))
            })
            .collect()
    }
}

/// 강한 RSI 다이버전스
#[derive(Debug, Default)]
pub struct DivergenceSignal;

impl SignalEvaluator for DivergenceSignal {
    fn name(&self) -> &'static str {
        "divergence"
    }

    fn evaluate(&self, ctx: &SignalContext<'_>, _current: Action) -> Vec<Proposal> {
        let Some(kind) = ctx
            .divergence
            .strong_kind(ctx.config.strong_divergence_strength)
        else {
            return Vec::new();
        };

        let action = match kind {
            DivergenceKind::Bullish => Action::Buy,
            DivergenceKind::Bearish => Action::Sell,
        };
        vec![Proposal::overriding(
            action,
            format!(
                "{} divergence detected (strength: {:.1}%)",
                kind,
                ctx.divergence.strength * 100.0
            ),
        )]
    }
}

/// MACD 라인과 히스토그램 방향 확인
#[derive(Debug, Default)]
pub struct MacdSignal;

impl SignalEvaluator for MacdSignal {
    fn name(&self) -> &'static str {
        "macd"
    }

    fn evaluate(&self, ctx: &SignalContext<'_>, _current: Action) -> Vec<Proposal> {
        let indicators = ctx.indicators;
        if indicators.has_bullish_macd() {
            vec![Proposal::confirming(
                Action::Buy,
                "MACD indicates bullish momentum".to_string(),
            )]
        } else if indicators.has_bearish_macd() {
            vec![Proposal::confirming(
                Action::Sell,
                "MACD indicates bearish momentum".to_string(),
            )]
        } else {
            Vec::new()
        }
    }
}

/// 시장 심리가 반대하지 않는 RSI 과매도/과매수
#[derive(Debug, Default)]
pub struct RsiSignal;

impl SignalEvaluator for RsiSignal {
    fn name(&self) -> &'static str {
        "rsi"
    }

    fn evaluate(&self, ctx: &SignalContext<'_>, _current: Action) -> Vec<Proposal> {
        let rsi = ctx.indicators.rsi;
        let sentiment = ctx.sentiment.sentiment;

        if rsi < ctx.config.rsi_oversold && sentiment != SentimentLabel::Bearish {
            vec![Proposal::confirming(
                Action::Buy,
                "RSI indicates oversold conditions with supportive market sentiment".to_string(),
            )]
        } else if rsi > ctx.config.rsi_overbought && sentiment != SentimentLabel::Bullish {
            vec![Proposal::confirming(
                Action::Sell,
                "RSI indicates overbought conditions with weak market sentiment".to_string(),
            )]
        } else {
            Vec::new()
        }
    }
}

/// 피보나치 레벨 설명 (액션 변경 없음)
///
/// 되돌림 레벨은 고점에서 내려가므로 더 깊은 61.8%를 먼저 확인합니다.
#[derive(Debug, Default)]
pub struct FibonacciSignal;

impl SignalEvaluator for FibonacciSignal {
    fn name(&self) -> &'static str {
        "fibonacci"
    }

    fn evaluate(&self, ctx: &SignalContext<'_>, current: Action) -> Vec<Proposal> {
        let price = ctx.indicators.price;
        let fib = &ctx.fibonacci;

        let reason = match current {
            Action::Buy if price <= fib.retracement.level_618 => {
                "Price at key Fibonacci support level (61.8%)"
            }
            Action::Buy if price <= fib.retracement.level_382 => {
                "Price at strong Fibonacci support level (38.2%)"
            }
            Action::Sell if price >= fib.extension.level_1618 => {
                "Price reached Fibonacci extension target (161.8%)"
            }
            _ => return Vec::new(),
        };
        vec![Proposal::note(reason.to_string())]
    }
}

/// 거래량 확인
#[derive(Debug, Default)]
pub struct VolumeSignal;

impl SignalEvaluator for VolumeSignal {
    fn name(&self) -> &'static str {
        "volume"
    }

    fn evaluate(&self, ctx: &SignalContext<'_>, _current: Action) -> Vec<Proposal> {
        let ratio = ctx.indicators.volume_ratio;
        if ratio > ctx.config.volume_confirmation_ratio {
            vec![Proposal::note(format!(
                "Strong volume confirmation ({:.2}x average)",
                ratio
            ))]
        } else {
            Vec::new()
        }
    }
}

/// 시장 심리 요인을 그대로 설명에 추가
#[derive(Debug, Default)]
pub struct SentimentFactorSignal;

impl SignalEvaluator for SentimentFactorSignal {
    fn name(&self) -> &'static str {
        "sentiment"
    }

    fn evaluate(&self, ctx: &SignalContext<'_>, _current: Action) -> Vec<Proposal> {
        ctx.sentiment
            .factors
            .iter()
            .cloned()
            .map(Proposal::note)
            .collect()
    }
}

/// 기본 평가기 순서: 패턴, 다이버전스, MACD, RSI, 피보나치, 거래량, 심리 요인
pub fn default_evaluators() -> Vec<Box<dyn SignalEvaluator>> {
    vec![
        Box::new(PatternSignal),
        Box::new(DivergenceSignal),
        Box::new(MacdSignal),
        Box::new(RsiSignal),
        Box::new(FibonacciSignal),
        Box::new(VolumeSignal),
        Box::new(SentimentFactorSignal),
    ]
}

/// 평가기 실행 결과
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub reasons: Vec<String>,
}

/// 평가기를 순서대로 실행하여 액션과 설명을 결정
///
/// HOLD에서 시작해 각 제안을 우선순위 규칙으로 적용하고, 설명은 모두 순서대로 모읍니다.
pub fn resolve(evaluators: &[Box<dyn SignalEvaluator>], ctx: &SignalContext<'_>) -> Decision {
    let mut action = Action::Hold;
    let mut reasons = Vec::new();

    for evaluator in evaluators {
        for proposal in evaluator.evaluate(ctx, action) {
            let next = proposal.apply(action);
            if next != action {
                log::trace!("[{}] {} -> {}", evaluator.name(), action, next);
            }
            action = next;
            reasons.push(proposal.reason);
        }
    }

    Decision { action, reasons }
}

/// 심리와 충돌하거나 근거가 없으면 HOLD로 전환
pub fn apply_conflict_override(decision: &mut Decision, sentiment: SentimentLabel) {
    let conflicting = matches!(
        (decision.action, sentiment),
        (Action::Buy, SentimentLabel::Bearish) | (Action::Sell, SentimentLabel::Bullish)
    );

    if decision.reasons.is_empty() || conflicting {
        decision.action = Action::Hold;
        decision
            .reasons
            .push("Mixed or unclear market signals".to_string());
    }
}
