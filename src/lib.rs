pub mod logger;
pub mod region_pipeline;
