pub mod analyzer;
pub mod lexicon;
pub mod picker;
