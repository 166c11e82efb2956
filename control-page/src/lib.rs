#![cfg_attr(not(test), no_std)]

//! Control page served at `/`.
//!
//! A single self-contained document: the LED switches call `/set` and `/all`,
//! and the page polls `/state` every 1.2 s to refresh LEDs and buttons.

pub const CONTROL_PAGE_HTML: &[u8] = include_bytes!("../index.html");
