pub mod mention_record;
pub mod opportunity;
