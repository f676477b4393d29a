pub mod narration;
pub mod shared;
