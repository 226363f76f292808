pub mod notifier;
pub mod factory;

use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum NotifyVia {
    Log,
    Memory,
}
