// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

mod channels;
mod outputs;
mod subscriber;

pub use channels::{merge_channels, standard_channels, ChannelConfig, ChannelConfigLayer};
pub use outputs::{
	default_outputs, merge_outputs, OutputConfig, OutputConfigLayer, OutputKind, OutputTarget,
	CONSOLE_OUTPUT, FILE_OUTPUT,
};
pub use subscriber::{TracingConfig, TracingConfigLayer, TracingFormat};
