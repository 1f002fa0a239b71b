pub mod driver;
pub mod narrow;

pub use driver::CorpusSearch;
pub use narrow::NarrowingSearch;
