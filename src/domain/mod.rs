pub mod error;
pub mod image;
pub mod period;
pub mod track;
