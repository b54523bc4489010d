//! The surface of an editable attribute model as seen by the binding layer.
//!
//! A model exposes its fields through named [`Path`]s, records validation
//! failures in an [`ErrorBag`] and applies edits through
//! [`Modifiable::modify`].

use std::fmt::Debug;
use std::rc::Rc;

use fxhash::FxHashMap;

/// A named accessor for a field of `Root` that may be absent.
pub struct Path<Root, V> {
	key: Rc<str>,
	read: Rc<dyn Fn(&Root) -> Option<V>>,
	write: Rc<dyn Fn(&mut Root, V) -> bool>,
}

impl<Root, V> Clone for Path<Root, V> {
	fn clone(&self) -> Self {
		Path {
			key: self.key.clone(),
			read: self.read.clone(),
			write: self.write.clone(),
		}
	}
}

impl<Root, V> Path<Root, V>
where
	Root: 'static,
	V: 'static,
{
	/// `write` returns `false` when the field is absent and nothing was
	/// written.
	pub fn new(
		key: impl Into<Rc<str>>,
		read: impl Fn(&Root) -> Option<V> + 'static,
		write: impl Fn(&mut Root, V) -> bool + 'static,
	) -> Self {
		Path {
			key: key.into(),
			read: Rc::new(read),
			write: Rc::new(write),
		}
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn get(&self, root: &Root) -> Option<V> {
		(self.read)(root)
	}

	pub fn set(&self, root: &mut Root, value: V) -> bool {
		(self.write)(root, value)
	}

	pub fn is_nil(&self, root: &Root) -> bool {
		self.get(root).is_none()
	}

	/// Continues this path into a field of `V`.
	pub fn then<W>(&self, inner: Path<V, W>) -> Path<Root, W>
	where
		W: 'static,
	{
		let key = format!("{}.{}", self.key, inner.key);
		let outer = self.clone();
		let read_inner = inner.clone();
		Path::new(
			key,
			move |root| outer.get(root).and_then(|middle| read_inner.get(&middle)),
			{
				let outer = self.clone();
				move |root, value| match outer.get(root) {
					Some(mut middle) => inner.set(&mut middle, value) && outer.set(root, middle),
					None => false,
				}
			},
		)
	}
}

impl<Root, V> Debug for Path<Root, V> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Path").field(&self.key).finish()
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelError {
	pub path: String,
	pub message: String,
}

/// Validation messages grouped by path key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorBag {
	errors: FxHashMap<String, Vec<ModelError>>,
}

impl ErrorBag {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, path: &str, message: impl Into<String>) {
		self.errors
			.entry(path.to_owned())
			.or_default()
			.push(ModelError {
				path: path.to_owned(),
				message: message.into(),
			});
	}

	pub fn remove(&mut self, path: &str) {
		self.errors.remove(path);
	}

	pub fn errors(&self, path: &str) -> &[ModelError] {
		self.errors.get(path).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn messages(&self, path: &str) -> Vec<String> {
		self.errors(path).iter().map(|e| e.message.clone()).collect()
	}

	pub fn is_empty(&self) -> bool {
		self.errors.values().all(Vec::is_empty)
	}

	pub fn clear(&mut self) {
		self.errors.clear()
	}
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModifyError {
	#[error("no value at path `{path}`")]
	Absent { path: String },

	#[error("invalid value at path `{path}`: {message}")]
	Invalid { path: String, message: String },
}

/// A model that accepts edits addressed by [`Path`].
pub trait Modifiable: Clone + 'static {
	fn error_bag(&self) -> &ErrorBag;
	fn error_bag_mut(&mut self) -> &mut ErrorBag;

	/// Checks the model after the field at `path` changed.
	fn validate(&self, path: &str) -> Result<(), String> {
		let _ = path;
		Ok(())
	}

	/// Writes `value` at `path`.
	///
	/// Returns `Ok(false)` when the field already holds `value`. The edit
	/// is made on a copy and only committed when it validates; a rejected
	/// edit leaves the model untouched apart from the recorded error.
	fn modify<V>(&mut self, path: &Path<Self, V>, value: V) -> Result<bool, ModifyError>
	where
		V: Clone + PartialEq + 'static,
	{
		let current = path.get(self).ok_or_else(|| ModifyError::Absent {
			path: path.key().to_owned(),
		})?;
		if current == value {
			return Ok(false);
		}

		let mut next = self.clone();
		if !path.set(&mut next, value) {
			return Err(ModifyError::Absent {
				path: path.key().to_owned(),
			});
		}
		next.error_bag_mut().remove(path.key());

		match next.validate(path.key()) {
			Ok(()) => {
				*self = next;
				Ok(true)
			}
			Err(message) => {
				tracing::debug!(path = path.key(), %message, "rejected modification");
				let bag = self.error_bag_mut();
				bag.remove(path.key());
				bag.insert(path.key(), message.clone());
				Err(ModifyError::Invalid {
					path: path.key().to_owned(),
					message,
				})
			}
		}
	}
}
