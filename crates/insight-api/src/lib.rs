// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod backend;
mod client;
mod mock;

pub use backend::{Backend, FeedbackRequest};
pub use client::HttpBackend;
pub use mock::{BackendCall, ScriptedBackend};
