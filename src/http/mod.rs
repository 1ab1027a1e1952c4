mod api;
mod client;
#[cfg(test)]
pub(crate) mod mock;

pub use api::BrightApi;
pub use client::{HttpClient, Transport};
