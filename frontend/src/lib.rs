//! Yew bindings for the Taskify list loaders.
//!
//! The hooks in [`hooks`] wrap the explicit loader objects from
//! `taskify-loader` in component-friendly state, and [`services`] holds
//! the REST client and console logging used by every view.

pub mod hooks;
pub mod services;
