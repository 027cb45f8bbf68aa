mod dispatch;
pub mod evaluate;

pub use dispatch::dispatch;
