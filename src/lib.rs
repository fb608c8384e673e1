pub mod normalize;
pub mod timestamp;
pub mod record;
pub mod filter;
pub mod stats;
pub mod chart;
pub mod grouping;
pub mod style;
pub mod source;
pub mod view;
pub mod config;
pub mod error;
