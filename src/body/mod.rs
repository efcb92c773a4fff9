pub mod stomach;

pub use stomach::{ReagentParcel, Stomach};
