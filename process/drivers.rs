//! Drivers hide the details of how data is retrieved from
//! registries so the tag metadata core only deals with
//! narrow traits.

pub use oci_client::OciClientDriver;
pub use traits::*;

mod oci_client;
mod traits;
