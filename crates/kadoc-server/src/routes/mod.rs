pub mod articles;
pub mod health;
pub mod snippets;
