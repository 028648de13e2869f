//! Domain model (run identifiers, statuses, errors).

pub mod errors;
pub mod ids;
pub mod status;

pub use self::errors::TetherError;
pub use self::ids::RunId;
pub use self::status::RunStatus;
