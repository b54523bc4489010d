use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use crate::lens::{Index, Lens};

/// A read-only handle to a value that lives somewhere else.
///
/// The handle stores an accessor rather than the value, so every call to
/// [`ConstRef::get`] re-evaluates the source of truth. Derived handles
/// compose their projection with the parent accessor and stay live.
pub struct ConstRef<T> {
	get: Rc<dyn Fn() -> T>,
}

impl<T> Clone for ConstRef<T> {
	fn clone(&self) -> Self {
		ConstRef {
			get: self.get.clone(),
		}
	}
}

impl<T> ConstRef<T>
where
	T: 'static,
{
	pub fn new(get: impl Fn() -> T + 'static) -> Self {
		ConstRef { get: Rc::new(get) }
	}

	/// A reference over a private copy of `value`.
	pub fn copying(value: T) -> Self
	where
		T: Clone,
	{
		ConstRef::new(move || value.clone())
	}

	#[inline]
	pub fn get(&self) -> T {
		(self.get)()
	}

	pub fn map<U, F>(&self, projection: F) -> ConstRef<U>
	where
		F: Fn(&T) -> U + 'static,
		U: 'static,
	{
		let get = self.get.clone();
		ConstRef::new(move || projection(&get()))
	}

	/// Derives a reference into a field that may be absent.
	///
	/// Reads substitute `default` while the projection yields `None`.
	pub fn map_or<U, F>(&self, default: U, projection: F) -> ConstRef<U>
	where
		F: Fn(&T) -> Option<U> + 'static,
		U: Clone + 'static,
	{
		let get = self.get.clone();
		ConstRef::new(move || projection(&get()).unwrap_or_else(|| default.clone()))
	}

	pub fn focus<L>(&self, lens: L) -> ConstRef<L::Target>
	where
		L: Lens<T>,
		L::Target: 'static,
	{
		self.map(move |value| lens.get(value))
	}
}

impl<E> ConstRef<Vec<E>>
where
	E: Clone + Default + 'static,
{
	/// One live reference per element currently in the vector.
	///
	/// A reference whose slot disappears later reads `E::default()`.
	pub fn elements(&self) -> Vec<ConstRef<E>> {
		(0..self.get().len())
			.map(|index| self.map_or(E::default(), move |items| Index(index).get(items)))
			.collect()
	}
}

impl<T> PartialEq for ConstRef<T>
where
	T: PartialEq + 'static,
{
	fn eq(&self, other: &Self) -> bool {
		self.get() == other.get()
	}
}

impl<T> Eq for ConstRef<T> where T: Eq + 'static {}

impl<T> Hash for ConstRef<T>
where
	T: Hash + 'static,
{
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.get().hash(state)
	}
}

impl<T> Debug for ConstRef<T>
where
	T: Debug + 'static,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("ConstRef").field(&self.get()).finish()
	}
}

#[cfg(feature = "serde")]
impl<T> serde::Serialize for ConstRef<T>
where
	T: serde::Serialize + 'static,
{
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.get().serialize(serializer)
	}
}
