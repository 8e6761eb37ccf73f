pub mod identified;

pub use identified::Identified;
