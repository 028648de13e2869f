//! Ports - 抽象化レイヤー
//!
//! The two external collaborators a handle talks to, behind traits so the
//! implementation can be swapped (in-memory for development/tests, a real
//! service client in production).

pub mod executor;
pub mod status_store;

pub use self::executor::Executor;
pub use self::status_store::StatusStore;
