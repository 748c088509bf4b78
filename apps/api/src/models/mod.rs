pub mod job_post;
pub mod resume;
