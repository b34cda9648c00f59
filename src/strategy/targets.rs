use crate::indicator::utils::round2;
use crate::model::Action;
use crate::pattern::fibonacci::FibonacciLevels;

/// 목표가와 손절가
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceTargets {
    pub target_price: f64,
    pub stop_loss: f64,
}

/// 최종 액션에 따른 목표가/손절가 계산 (소수점 둘째 자리 반올림)
///
/// * BUY: 목표가 `max(price * (1 + vol * (2 + strength)), 161.8% 확장)`,
///   손절가 `max(price * (1 - vol * 1.5), 78.6% 되돌림)`
/// * SELL: 목표가 `min(price * (1 - vol * (2 + strength)), 78.6% 되돌림)`,
///   손절가 `min(price * (1 + vol * 1.5), 161.8% 확장)`
/// * HOLD: 둘 다 현재가
///
/// # Arguments
/// * `action` - 최종 액션
/// * `price` - 현재가
/// * `volatility` - 스냅샷 변동성
/// * `sentiment_strength` - 시장 심리 강도
/// * `fibonacci` - 구간 고가/저가의 피보나치 레벨
pub fn calculate_targets(
    action: Action,
    price: f64,
    volatility: f64,
    sentiment_strength: f64,
    fibonacci: &FibonacciLevels,
) -> PriceTargets {
    let reward = volatility * (2.0 + sentiment_strength);
    let risk = volatility * 1.5;
    let extension = fibonacci.extension.level_1618;
    let retracement = fibonacci.retracement.level_786;

    let (target_price, stop_loss) = match action {
        Action::Buy => (
            (price * (1.0 + reward)).max(extension),
            (price * (1.0 - risk)).max(retracement),
        ),
        Action::Sell => (
            (price * (1.0 - reward)).min(retracement),
            (price * (1.0 + risk)).min(extension),
        ),
        Action::Hold => (price, price),
    };

    PriceTargets {
        target_price: round2(target_price),
        stop_loss: round2(stop_loss),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_targets_equal_price() {
        let fib = FibonacciLevels::calculate(110.0, 90.0);
        let targets = calculate_targets(Action::Hold, 100.123, 0.05, 0.3, &fib);
        assert_eq!(targets.target_price, 100.12);
        assert_eq!(targets.stop_loss, 100.12);
    }

    #[test]
    fn test_buy_targets_use_fibonacci_floor() {
        // 확장 110 + 20 * 1.618 = 142.36, 되돌림 110 - 20 * 0.786 = 94.28
        let fib = FibonacciLevels::calculate(110.0, 90.0);
        let targets = calculate_targets(Action::Buy, 100.0, 0.02, 0.0, &fib);
        assert_eq!(targets.target_price, 142.36);
        // 100 * (1 - 0.03) = 97 > 94.28
        assert_eq!(targets.stop_loss, 97.0);
    }

    #[test]
    fn test_sell_targets() {
        let fib = FibonacciLevels::calculate(110.0, 90.0);
        let targets = calculate_targets(Action::Sell, 100.0, 0.02, 0.5, &fib);
        // min(100 * 0.95, 94.28)
        assert_eq!(targets.target_price, 94.28);
        // min(103, 142.36)
        assert_eq!(targets.stop_loss, 103.0);
    }
}
