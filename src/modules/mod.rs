pub mod backend;
pub mod documents;
pub mod editing;
pub mod items;
