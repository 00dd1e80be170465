//! Ports - 抽象化レイヤー
//!
//! Seams that the invoker depends on without fixing an implementation:
//! time, id generation, and routing decisions.

pub mod clock;
pub mod dispatch;
pub mod id_generator;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::dispatch::DispatchStrategy;
pub use self::id_generator::{IdGenerator, UlidGenerator};
