pub mod article;
pub mod snippet;
