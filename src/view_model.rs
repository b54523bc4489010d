use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::{Rc, Weak};

use crate::model::{Modifiable, Path};
use crate::subscribers::{Subscribers, Subscription};
use crate::{ChangeNotifier, ConstRef, Ref, Value};

type ValueCallback<T> = Rc<dyn Fn(&ViewModel<T>, &T)>;

/// The presentation-side holder of a bound field.
///
/// A view model owns a [`Value`] and a label and reports changes through a
/// single callback slot, which the [`Controller`](crate::Controller) uses
/// to keep a view in sync. Additional observers can [`subscribe`].
///
/// [`subscribe`]: ViewModel::subscribe
pub struct ViewModel<T> {
	body: Rc<ViewModelBody<T>>,
}

pub struct ViewModelBody<T> {
	value: Value<T>,
	label: String,
	on_value_change: RefCell<Option<ValueCallback<T>>>,
	subscribers: Subscribers<T>,
}

impl<T> Clone for ViewModel<T> {
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

impl<T> ViewModel<T>
where
	T: Clone + PartialEq + 'static,
{
	pub fn new(value: Value<T>, label: impl Into<String>) -> Self {
		ViewModel {
			body: Rc::new(ViewModelBody {
				value,
				label: label.into(),
				on_value_change: RefCell::new(None),
				subscribers: Subscribers::new(),
			}),
		}
	}

	pub fn from_ref(value: Ref<T>, errors: ConstRef<Vec<String>>, label: impl Into<String>) -> Self {
		Self::new(Value::new(value, errors), label)
	}

	pub fn at<Root>(
		root: Ref<Root>,
		path: Path<Root, T>,
		default: T,
		label: impl Into<String>,
		notifier: Option<Rc<dyn ChangeNotifier>>,
	) -> Self
	where
		Root: Modifiable,
	{
		Self::new(Value::at(root, path, default, notifier), label)
	}

	pub fn at_optional<Root>(
		root: Ref<Root>,
		path: Path<Root, Option<T>>,
		default: T,
		label: impl Into<String>,
		notifier: Option<Rc<dyn ChangeNotifier>>,
	) -> Self
	where
		Root: Modifiable,
	{
		Self::new(Value::at_optional(root, path, default, notifier), label)
	}

	/// [`ViewModel::at`] with `T::default()` for an absent field.
	pub fn at_or_default<Root>(
		root: Ref<Root>,
		path: Path<Root, T>,
		label: impl Into<String>,
		notifier: Option<Rc<dyn ChangeNotifier>>,
	) -> Self
	where
		Root: Modifiable,
		T: Default,
	{
		Self::at(root, path, T::default(), label, notifier)
	}

	pub fn label(&self) -> &str {
		&self.body.label
	}

	#[inline]
	pub fn get(&self) -> T {
		self.body.value.get()
	}

	/// Writes `value` to the model and reports the new value.
	///
	/// Nothing is reported unless the value read back changed, so writing
	/// the current value or a value the model refuses is silent.
	pub fn set(&self, value: T) {
		if self.get() == value {
			tracing::trace!(label = %self.body.label, "view model unchanged");
			return;
		}
		if self.body.value.set(value) {
			self.send();
		} else {
			tracing::trace!(label = %self.body.label, "view model write refused");
		}
	}

	pub fn errors(&self) -> Vec<String> {
		self.body.value.errors()
	}

	pub fn is_valid(&self) -> bool {
		self.body.value.is_valid()
	}

	pub fn value(&self) -> &Value<T> {
		&self.body.value
	}

	/// Installs the change callback, replacing any previous one.
	pub fn on_value_change(&self, callback: impl Fn(&ViewModel<T>, &T) + 'static) {
		*self.body.on_value_change.borrow_mut() = Some(Rc::new(callback));
	}

	#[must_use]
	pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
		self.body.subscribers.subscribe(callback)
	}

	/// Reports the current value to the callback and to every subscriber.
	pub fn send(&self) {
		let value = self.get();
		tracing::trace!(label = %self.body.label, "view model changed");
		let callback = self.body.on_value_change.borrow().clone();
		if let Some(callback) = callback {
			callback(self, &value);
		}
		self.body.subscribers.notify(&value);
	}

	pub fn downgrade(&self) -> WeakViewModel<T> {
		WeakViewModel {
			body: Rc::downgrade(&self.body),
		}
	}

	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.body, &other.body)
	}
}

impl<T> ChangeNotifier for ViewModel<T>
where
	T: Clone + PartialEq + 'static,
{
	fn send(&self) {
		ViewModel::send(self)
	}
}

impl<T> Debug for ViewModel<T>
where
	T: Clone + PartialEq + Debug + 'static,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ViewModel")
			.field("label", &self.body.label)
			.field("value", &self.get())
			.finish()
	}
}

pub struct WeakViewModel<T> {
	body: Weak<ViewModelBody<T>>,
}

impl<T> Clone for WeakViewModel<T> {
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

impl<T> WeakViewModel<T> {
	pub fn upgrade(&self) -> Option<ViewModel<T>> {
		self.body.upgrade().map(|body| ViewModel { body })
	}
}

pub type BoolViewModel = ViewModel<bool>;

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::ViewModel;
	use crate::{ConstRef, Ref};

	fn recorder(view_model: &ViewModel<bool>) -> Rc<RefCell<Vec<bool>>> {
		let seen = Rc::new(RefCell::new(Vec::new()));
		view_model.on_value_change({
			let seen = seen.clone();
			move |_, value| seen.borrow_mut().push(*value)
		});
		seen
	}

	#[test]
	fn equal_write_does_not_fire() {
		let view_model = ViewModel::from_ref(Ref::copying(false), ConstRef::copying(vec![]), "Bool");
		let seen = recorder(&view_model);

		view_model.set(false);
		view_model.set(true);
		view_model.set(true);

		assert_eq!(*seen.borrow(), vec![true]);
		assert_eq!(view_model.label(), "Bool");
	}

	#[test]
	fn refused_write_does_not_fire() {
		let view_model = ViewModel::from_ref(Ref::new(|| false, |_| {}), ConstRef::copying(vec![]), "Bool");
		let seen = recorder(&view_model);

		view_model.set(true);
		view_model.set(true);

		assert!(seen.borrow().is_empty());
		assert!(!view_model.get());
	}

	#[test]
	fn registration_replaces_previous_callback() {
		let view_model = ViewModel::from_ref(Ref::copying(false), ConstRef::copying(vec![]), "Bool");
		let first = recorder(&view_model);
		let second = recorder(&view_model);

		view_model.set(true);

		assert!(first.borrow().is_empty());
		assert_eq!(*second.borrow(), vec![true]);
	}

	#[test]
	fn callback_receives_the_view_model() {
		let view_model = ViewModel::from_ref(Ref::copying(0), ConstRef::copying(vec![]), "Count");
		let reported = Rc::new(RefCell::new(None));
		view_model.on_value_change({
			let reported = reported.clone();
			move |vm, value| *reported.borrow_mut() = Some((vm.clone(), *value))
		});

		view_model.set(3);

		let (vm, value) = reported.borrow_mut().take().unwrap();
		assert!(vm.ptr_eq(&view_model));
		assert_eq!(value, 3);
	}

	#[test]
	fn subscribers_see_every_change() {
		let view_model = ViewModel::from_ref(Ref::copying(false), ConstRef::copying(vec![]), "Bool");
		let seen = Rc::new(RefCell::new(Vec::new()));
		let subscription = view_model.subscribe({
			let seen = seen.clone();
			move |value| seen.borrow_mut().push(*value)
		});

		view_model.set(true);
		view_model.send();
		drop(subscription);
		view_model.set(false);

		assert_eq!(*seen.borrow(), vec![true, true]);
	}
}
