pub mod corpus;
pub mod market;
pub mod storage;
