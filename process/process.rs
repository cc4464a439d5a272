//! This module is responsible for reaching out of the process
//! on behalf of the tag metadata core. It contains drivers that
//! talk to image registries, like resolving a manifest digest.

use std::sync::LazyLock;

use tokio::runtime::Runtime;

pub mod drivers;

/// Runtime used to drive the async registry client
/// from synchronous code.
pub static ASYNC_RUNTIME: LazyLock<Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build the async runtime")
});
