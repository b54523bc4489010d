use std::marker::PhantomData;

/// Addresses a component of a larger value.
///
/// `get` extracts a copy of the component and `set` writes one back into
/// a value of the outer type. References derive live sub-references through
/// lenses instead of holding pointers into the outer value.
pub trait Lens<T>: 'static {
	type Target;

	fn get(&self, value: &T) -> Self::Target;
	fn set(&self, value: &mut T, target: Self::Target);
}

pub struct FnLens<T, U, G, S> {
	get: G,
	set: S,
	marker: PhantomData<fn(T) -> U>,
}

/// Builds a lens out of a getter and a setter.
pub fn lens<T, U, G, S>(get: G, set: S) -> FnLens<T, U, G, S>
where
	G: Fn(&T) -> U + 'static,
	S: Fn(&mut T, U) + 'static,
{
	FnLens {
		get,
		set,
		marker: PhantomData,
	}
}

impl<T, U, G, S> Lens<T> for FnLens<T, U, G, S>
where
	T: 'static,
	U: 'static,
	G: Fn(&T) -> U + 'static,
	S: Fn(&mut T, U) + 'static,
{
	type Target = U;

	fn get(&self, value: &T) -> U {
		(self.get)(value)
	}

	fn set(&self, value: &mut T, target: U) {
		(self.set)(value, target)
	}
}

/// A slot of a `Vec`. The slot may not exist, so the target is optional:
/// reading past the end gives `None`, and writes outside the vector or
/// writes of `None` leave it untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Index(pub usize);

impl<E> Lens<Vec<E>> for Index
where
	E: Clone + 'static,
{
	type Target = Option<E>;

	fn get(&self, value: &Vec<E>) -> Option<E> {
		value.get(self.0).cloned()
	}

	fn set(&self, value: &mut Vec<E>, target: Option<E>) {
		if let (Some(slot), Some(target)) = (value.get_mut(self.0), target) {
			*slot = target;
		}
	}
}

pub struct Then<A, B> {
	outer: A,
	inner: B,
}

impl<T, A, B> Lens<T> for Then<A, B>
where
	A: Lens<T>,
	B: Lens<A::Target>,
{
	type Target = B::Target;

	fn get(&self, value: &T) -> B::Target {
		self.inner.get(&self.outer.get(value))
	}

	fn set(&self, value: &mut T, target: B::Target) {
		let mut middle = self.outer.get(value);
		self.inner.set(&mut middle, target);
		self.outer.set(value, middle);
	}
}

pub trait LensExt<T>: Lens<T> + Sized {
	/// Focuses further into the component addressed by `self`.
	fn then<B>(self, inner: B) -> Then<Self, B>
	where
		B: Lens<Self::Target>,
	{
		Then { outer: self, inner }
	}
}

impl<T, L> LensExt<T> for L where L: Lens<T> {}
