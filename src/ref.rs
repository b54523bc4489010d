use std::cell::RefCell;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use crate::lens::{Index, Lens};
use crate::ConstRef;

/// A read-write handle to a value that lives somewhere else.
///
/// Like [`ConstRef`], a `Ref` holds an accessor and a mutator instead of
/// the value. A reference derived through [`Ref::map`] or [`Ref::focus`]
/// writes by reading the whole parent value, changing the projected field
/// on that copy and storing the whole value back through the parent.
pub struct Ref<T> {
	get: Rc<dyn Fn() -> T>,
	set: Rc<dyn Fn(T)>,
}

impl<T> Clone for Ref<T> {
	fn clone(&self) -> Self {
		Ref {
			get: self.get.clone(),
			set: self.set.clone(),
		}
	}
}

/// Values with an opposite, flipped in place by [`Ref::toggle`].
pub trait Toggle {
	fn toggle(&mut self);
}

impl Toggle for bool {
	fn toggle(&mut self) {
		*self = !*self
	}
}

impl<T> Ref<T>
where
	T: Clone + 'static,
{
	pub fn new(get: impl Fn() -> T + 'static, set: impl Fn(T) + 'static) -> Self {
		Ref {
			get: Rc::new(get),
			set: Rc::new(set),
		}
	}

	/// A reference over its own storage, initialised with `value`.
	pub fn copying(value: T) -> Self {
		Ref::from_cell(Rc::new(RefCell::new(value)))
	}

	/// A reference over existing shared storage.
	pub fn from_cell(cell: Rc<RefCell<T>>) -> Self {
		let read = cell.clone();
		Ref::new(
			move || read.borrow().clone(),
			move |value| *cell.borrow_mut() = value,
		)
	}

	#[inline]
	pub fn get(&self) -> T {
		(self.get)()
	}

	#[inline]
	pub fn set(&self, value: T) {
		tracing::trace!(target: "binding::ref", "write");
		(self.set)(value)
	}

	pub fn replace(&self, value: T) -> T {
		let previous = self.get();
		self.set(value);
		previous
	}

	/// Reads the value, lets `func` change the copy and writes it back.
	pub fn update(&self, func: impl FnOnce(&mut T)) {
		let mut value = self.get();
		func(&mut value);
		self.set(value)
	}

	#[inline]
	pub fn toggle(&self)
	where
		T: Toggle,
	{
		self.update(T::toggle)
	}

	pub fn as_const(&self) -> ConstRef<T> {
		let get = self.get.clone();
		ConstRef::new(move || get())
	}

	pub fn map<U, G, S>(&self, get: G, set: S) -> Ref<U>
	where
		G: Fn(&T) -> U + 'static,
		S: Fn(&mut T, U) + 'static,
		U: Clone + 'static,
	{
		let parent = self.clone();
		let read = self.get.clone();
		Ref::new(
			move || get(&read()),
			move |field| parent.update(|value| set(value, field)),
		)
	}

	pub fn focus<L>(&self, lens: L) -> Ref<L::Target>
	where
		L: Lens<T>,
		L::Target: Clone + 'static,
	{
		let lens = Rc::new(lens);
		let setter = lens.clone();
		self.map(
			move |value| lens.get(value),
			move |value, field| setter.set(value, field),
		)
	}
}

impl<E> Ref<Vec<E>>
where
	E: Clone + Default + 'static,
{
	/// One live reference per element currently in the vector.
	///
	/// A reference whose slot disappears later reads `E::default()` and
	/// drops writes.
	pub fn elements(&self) -> Vec<Ref<E>> {
		(0..self.get().len())
			.map(|index| {
				self.map(
					move |items| Index(index).get(items).unwrap_or_default(),
					move |items, item| Index(index).set(items, Some(item)),
				)
			})
			.collect()
	}
}

impl<T> PartialEq for Ref<T>
where
	T: Clone + PartialEq + 'static,
{
	fn eq(&self, other: &Self) -> bool {
		self.get() == other.get()
	}
}

impl<T> Eq for Ref<T> where T: Clone + Eq + 'static {}

impl<T> Hash for Ref<T>
where
	T: Clone + Hash + 'static,
{
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.get().hash(state)
	}
}

impl<T> Debug for Ref<T>
where
	T: Clone + Debug + 'static,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Ref").field(&self.get()).finish()
	}
}

impl<T> From<Ref<T>> for ConstRef<T>
where
	T: Clone + 'static,
{
	fn from(value: Ref<T>) -> Self {
		value.as_const()
	}
}

#[cfg(feature = "serde")]
impl<T> serde::Serialize for Ref<T>
where
	T: Clone + serde::Serialize + 'static,
{
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.get().serialize(serializer)
	}
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Ref<T>
where
	T: Clone + serde::Deserialize<'de> + 'static,
{
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		T::deserialize(deserializer).map(Ref::copying)
	}
}
