pub mod history;
pub mod info;
pub mod news;
pub mod symbols;
