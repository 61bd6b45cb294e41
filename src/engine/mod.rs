pub mod dispatch;
pub mod matching;
pub mod pricing;
