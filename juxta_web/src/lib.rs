//! # Juxta Browser Binding
//!
//! Mounts a [`juxta_core`] slider into a real page. The crate compiles to a
//! `wasm32` module exporting a single constructor:
//!
//! ```text
//! import init, { create } from "./juxta_web.js";
//!
//! await init();
//! const slider = create(
//!   document.getElementById("compare"),
//!   [
//!     { src: "1990.jpg", alt: "1990", label: "1990", credit: "USGS" },
//!     { src: "2020.jpg", alt: "2020", label: "2020" },
//!   ],
//!   { startingPosition: "30%", mode: "vertical", callback: (s) => console.log(s.position()) },
//! );
//!
//! // later, when the host unmounts the component
//! slider.destroy();
//! ```
//!
//! On other targets the crate only re-exports the core.
//!
//! ## Modules (wasm32 only)
//!
//! - `surface` - `web-sys` implementation of the document surface
//! - `config` - Reading image specs and options from JS values
//! - `handle` - The exported `create()` and the `SliderHandle` disposer
//! - `logging` - `tracing` output routed to the browser console

pub use juxta_core;

#[cfg(target_arch = "wasm32")]
mod config;
#[cfg(target_arch = "wasm32")]
mod handle;
#[cfg(target_arch = "wasm32")]
mod logging;
#[cfg(target_arch = "wasm32")]
mod surface;

#[cfg(target_arch = "wasm32")]
pub use handle::{create, SliderHandle};
#[cfg(target_arch = "wasm32")]
pub use surface::WebSurface;
