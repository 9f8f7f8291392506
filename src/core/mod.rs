pub mod account_resolver;
pub mod constants;
pub mod error;
pub mod field_extractor;
pub mod instruction_filter;
pub mod mint_normalizer;
pub mod pool_indexer;
pub mod priority_fee;
pub mod utils;
