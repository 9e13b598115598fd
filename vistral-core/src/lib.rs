//! Core library for the vistral test client: conversation templates, image
//! preparation, and the HTTP clients for a controller/worker serving stack.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub mod client;
pub mod conversation;
pub mod error;
pub mod images;
pub mod protocol;
pub mod streaming;

pub use client::{normalize_worker_addr, ControllerClient, WorkerClient};
pub use conversation::{conv_template, Conversation, SeparatorStyle};
pub use error::ClientError;
pub use images::{get_images, load_image, resize_image, ImageData, ImageReturn};
pub use protocol::{GenerateChunk, GenerateRequest};
pub use streaming::ChunkReader;

/// This should be called in the client binary before anything else.
pub fn initialize_logging() {
    let is_debug = std::env::var("VISTRAL_DEBUG")
        .unwrap_or_default()
        .contains('1');

    let filter = EnvFilter::builder()
        .with_default_directive(if is_debug {
            LevelFilter::DEBUG.into()
        } else {
            LevelFilter::INFO.into()
        })
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
