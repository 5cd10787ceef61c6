pub mod indicators;
pub mod layout;
pub mod number_parse;
pub mod shortcuts;
pub mod storage;
