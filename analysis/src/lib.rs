pub mod decoder;
pub mod demolitions;
pub mod players;
pub mod recovery;
pub mod series;
pub mod timeline;
