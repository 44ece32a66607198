pub mod adaptors;
pub mod auth;
pub mod email;
pub mod minio;
pub mod pipeline;
pub mod report;
