// 이동평균 지표 모듈
// 단순이동평균과 지수이동평균을 제공합니다.

pub mod ema;
pub mod sma;

pub use ema::{calculate_ema, calculate_ema_series};
pub use sma::calculate_sma;
