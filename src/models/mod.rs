pub mod published_item;

pub use published_item::{ClaimedJob, JobStatus, PublishedItem};
