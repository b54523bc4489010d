use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

type Callback<T> = Rc<dyn Fn(&T)>;

/// Observers notified in registration order.
///
/// Callbacks are held weakly; the [`Subscription`] returned by
/// [`Subscribers::subscribe`] keeps one alive. Dead entries are pruned on
/// the next notification.
pub struct Subscribers<T, const N: usize = 2> {
	list: RefCell<SmallVec<[Weak<dyn Fn(&T)>; N]>>,
}

impl<T, const N: usize> Default for Subscribers<T, N> {
	fn default() -> Self {
		Subscribers {
			list: RefCell::new(SmallVec::new()),
		}
	}
}

impl<T: 'static, const N: usize> Subscribers<T, N> {
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
		let callback: Callback<T> = Rc::new(callback);
		self.list.borrow_mut().push(Rc::downgrade(&callback));
		Subscription {
			_guard: Box::new(callback),
		}
	}

	pub fn notify(&self, value: &T) {
		// Callbacks may subscribe or drop guards, so none of them runs
		// while the list is borrowed.
		let live: SmallVec<[Callback<T>; N]> = {
			let mut list = self.list.borrow_mut();
			list.retain(|weak| weak.strong_count() > 0);
			list.iter().filter_map(Weak::upgrade).collect()
		};
		for callback in live {
			callback(value)
		}
	}

	/// Number of registered callbacks, including ones not yet pruned.
	pub fn len(&self) -> usize {
		self.list.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Keeps a subscription alive. Dropping it unsubscribes.
pub struct Subscription {
	_guard: Box<dyn Any>,
}

impl std::fmt::Debug for Subscription {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Subscription").finish_non_exhaustive()
	}
}
