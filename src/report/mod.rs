pub mod html;
pub mod work_items;

use std::path::PathBuf;
use thiserror::Error;

pub use html::{render_report, save_report};
pub use work_items::collect_work_items;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to render report")]
    Render(#[source] std::io::Error),
    #[error("failed to create report file {}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write report file {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
