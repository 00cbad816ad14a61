mod download;
mod health_check;

pub use download::{DownloadRequest, Envelope, download};
pub use health_check::health_check;
