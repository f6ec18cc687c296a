pub mod queue;

pub use queue::{Controls, InputEvent, InputQueue};
