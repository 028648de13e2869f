//! Port implementations (開発・テスト用の in-memory 実装).

pub mod inmem;

pub use self::inmem::{InMemoryExecutor, InMemoryStatusStore};
