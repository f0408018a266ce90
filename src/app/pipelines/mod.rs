pub mod insight_pipeline;
pub mod report_archive;
