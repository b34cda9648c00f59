use crate::model::HistoricalPoint;
use std::fmt::Display;

/// OHLCV 캔들 인터페이스
///
/// 패턴 판정 함수는 이 트레이트만 사용하므로 실제 OHLC 캔들과
/// 포인트 시계열에서 합성한 `PriceAction` 모두에 적용할 수 있습니다.
pub trait Candle {
    fn open_price(&self) -> f64;
    fn high_price(&self) -> f64;
    fn low_price(&self) -> f64;
    fn close_price(&self) -> f64;
    fn volume(&self) -> f64;

    /// 몸통 크기 |종가 - 시가|
    fn body_size(&self) -> f64 {
        (self.close_price() - self.open_price()).abs()
    }

    /// 전체 범위 (고가 - 저가)
    fn range(&self) -> f64 {
        self.high_price() - self.low_price()
    }

    /// 윗꼬리 길이
    fn upper_shadow(&self) -> f64 {
        self.high_price() - self.open_price().max(self.close_price())
    }

    /// 아랫꼬리 길이
    fn lower_shadow(&self) -> f64 {
        self.open_price().min(self.close_price()) - self.low_price()
    }

    /// 양봉 여부
    fn is_bullish(&self) -> bool {
        self.close_price() > self.open_price()
    }

    /// 음봉 여부
    fn is_bearish(&self) -> bool {
        self.close_price() < self.open_price()
    }

    /// 몸통 중간값
    fn body_midpoint(&self) -> f64 {
        (self.open_price() + self.close_price()) / 2.0
    }
}

/// 포인트 시계열에서 합성한 캔들
///
/// 인접한 두 포인트로 시가(이전 가격), 종가(현재 가격),
/// 고가/저가(두 가격의 최대/최소)를 만듭니다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceAction {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceAction {
    /// `index - 1`, `index` 두 포인트로 캔들 생성 (index가 0이거나 범위 밖이면 None)
    pub fn from_points(points: &[HistoricalPoint], index: usize) -> Option<PriceAction> {
        let prev = points.get(index.checked_sub(1)?)?;
        let current = points.get(index)?;
        Some(PriceAction {
            open: prev.price,
            high: prev.price.max(current.price),
            low: prev.price.min(current.price),
            close: current.price,
            volume: current.volume,
        })
    }
}

impl Candle for PriceAction {
    fn open_price(&self) -> f64 {
        self.open
    }
    fn high_price(&self) -> f64 {
        self.high
    }
    fn low_price(&self) -> f64 {
        self.low
    }
    fn close_price(&self) -> f64 {
        self.close
    }
    fn volume(&self) -> f64 {
        self.volume
    }
}

impl Display for PriceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PriceAction(o={:.2}, h={:.2}, l={:.2}, c={:.2}, v={:.2})",
            self.open, self.high, self.low, self.close, self.volume
        )
    }
}

/// 도지: 몸통이 전체 범위의 10% 미만 (범위가 0이면 도지 아님)
pub fn is_doji<C: Candle>(candle: &C) -> bool {
    let range = candle.range();
    range > 0.0 && candle.body_size() / range < 0.1
}

/// 망치형: 아랫꼬리 > 몸통 2배, 윗꼬리 < 몸통 절반
pub fn is_hammer<C: Candle>(candle: &C) -> bool {
    let body = candle.body_size();
    body > 0.0 && candle.lower_shadow() > body * 2.0 && candle.upper_shadow() < body * 0.5
}

/// 유성형: 망치형의 반대
pub fn is_shooting_star<C: Candle>(candle: &C) -> bool {
    let body = candle.body_size();
    body > 0.0 && candle.upper_shadow() > body * 2.0 && candle.lower_shadow() < body * 0.5
}

/// 상승 장악형: 음봉 다음 양봉이 이전 몸통을 감싸고 10% 이상 큼
pub fn is_bullish_engulfing<C: Candle>(current: &C, previous: &C) -> bool {
    current.is_bullish()
        && previous.is_bearish()
        && current.open_price() < previous.close_price()
        && current.close_price() > previous.open_price()
        && current.body_size() > previous.body_size() * 1.1
}

/// 하락 장악형: 양봉 다음 음봉이 이전 몸통을 감싸고 10% 이상 큼
pub fn is_bearish_engulfing<C: Candle>(current: &C, previous: &C) -> bool {
    current.is_bearish()
        && previous.is_bullish()
        && current.open_price() > previous.close_price()
        && current.close_price() < previous.open_price()
        && current.body_size() > previous.body_size() * 1.1
}

/// 가운데 캔들 몸통이 첫 캔들 몸통의 30% 미만인지
fn is_small_star<C: Candle>(middle: &C, first: &C) -> bool {
    middle.body_size() < first.body_size() * 0.3
}

/// 샛별형 (first, middle, current 순서)
pub fn is_morning_star<C: Candle>(current: &C, middle: &C, first: &C) -> bool {
    first.is_bearish()
        && current.is_bullish()
        && is_small_star(middle, first)
        && middle.close_price() < first.close_price()
        && current.close_price() > middle.high_price()
        && current.close_price() > first.body_midpoint()
}

/// 석별형 (first, middle, current 순서)
pub fn is_evening_star<C: Candle>(current: &C, middle: &C, first: &C) -> bool {
    first.is_bullish()
        && current.is_bearish()
        && is_small_star(middle, first)
        && middle.close_price() > first.close_price()
        && current.close_price() < middle.low_price()
        && current.close_price() < first.body_midpoint()
}

/// 적삼병: 연속 양봉, 시가와 종가가 모두 상승
pub fn is_three_white_soldiers<C: Candle>(first: &C, second: &C, third: &C) -> bool {
    first.is_bullish()
        && second.is_bullish()
        && third.is_bullish()
        && third.close_price() > second.close_price()
        && second.close_price() > first.close_price()
        && third.open_price() > second.open_price()
        && second.open_price() > first.open_price()
}

/// 흑삼병: 연속 음봉, 시가와 종가가 모두 하락
pub fn is_three_black_crows<C: Candle>(first: &C, second: &C, third: &C) -> bool {
    first.is_bearish()
        && second.is_bearish()
        && third.is_bearish()
        && third.close_price() < second.close_price()
        && second.close_price() < first.close_price()
        && third.open_price() < second.open_price()
        && second.open_price() < first.open_price()
}
