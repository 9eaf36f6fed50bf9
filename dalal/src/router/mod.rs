pub mod history;
pub mod info;
pub mod macros;
pub mod news;
pub mod quotes;
pub mod similar;
pub mod symbols;

pub mod util;
