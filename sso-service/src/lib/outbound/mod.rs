pub mod observers;
pub mod repositories;
