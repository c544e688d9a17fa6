pub mod health;
pub mod medicine;
pub mod pills;
pub mod reminder;
pub mod webhook;
