pub mod completions;
pub mod explore;
pub mod export;
pub mod order;
pub mod search;
pub mod show;
pub mod stats;
