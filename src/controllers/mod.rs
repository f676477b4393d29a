pub mod health;
pub mod narration;
pub mod pages;
