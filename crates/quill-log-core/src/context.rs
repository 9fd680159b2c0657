// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::any::Any;
use std::fmt;

/// Opaque reference to whatever a log message is about.
///
/// Channels pass it through to every output untouched. Outputs that know the
/// concrete type can recover it with [`Context::downcast_ref`]; all others
/// ignore it.
#[derive(Clone, Copy, Default)]
pub struct Context<'a> {
	value: Option<&'a dyn Any>,
}

impl<'a> Context<'a> {
	/// No context.
	pub fn none() -> Self {
		Self { value: None }
	}

	/// Wrap a reference to `value`.
	pub fn new<T: Any>(value: &'a T) -> Self {
		Self { value: Some(value) }
	}

	/// Whether no context was supplied.
	pub fn is_none(&self) -> bool {
		self.value.is_none()
	}

	/// Get the context as a `T`, if that is what it holds.
	pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
		self.value.and_then(|v| v.downcast_ref::<T>())
	}
}

impl fmt::Debug for Context<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.value {
			Some(_) => f.write_str("Context(..)"),
			None => f.write_str("Context(none)"),
		}
	}
}
