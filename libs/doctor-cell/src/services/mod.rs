pub mod doctor;
pub mod matching;
