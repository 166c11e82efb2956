#![cfg_attr(not(test), no_std)]

//! Board I/O core for the LED/button web panel.
//!
//! Layers, leaf first:
//! - `channel` - validated 1-based channel index
//! - `pins` - channel to GPIO lookup tables
//! - `gpio` - hardware port abstraction ([`GpioPort`])
//! - `registry` - authoritative output state ([`OutputRegistry`])
//! - `sampler` - fresh input reads ([`InputSampler`])
//! - `state` - JSON rendering of the combined state
//! - `request` - HTTP request line parsing ([`Request`])
//! - `query` - request parameter parsing
//! - `service` - the request handlers ([`IoService`])
//! - `net` - protocol helpers for the access point (DHCP)
//!
//! Everything here is hardware-agnostic; the firmware crate provides the
//! [`GpioPort`] implementation and the network plumbing.

pub mod channel;
pub mod gpio;
pub mod net;
pub mod pins;
pub mod query;
pub mod registry;
pub mod request;
pub mod sampler;
pub mod service;
pub mod state;

pub use channel::{CHANNEL_COUNT, Channel};
pub use gpio::{GpioError, GpioPort, Level};
pub use pins::{PinId, input_pin, output_pin};
pub use query::{SetAllParams, SetOutputParams};
pub use registry::OutputRegistry;
pub use request::{Method, Request};
pub use sampler::InputSampler;
pub use service::IoService;
pub use state::{RenderedState, render};
