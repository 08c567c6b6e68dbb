pub mod moods;
pub mod summary;
pub mod tasks;
