use std::rc::Rc;

use crate::model::{Modifiable, ModifyError, Path};
use crate::{ChangeNotifier, ConstRef, Ref};

/// A bound field: its value together with the validation state the model
/// keeps for it.
///
/// Nothing is cached. The value, the error list and validity are read
/// from the model on every access.
pub struct Value<T> {
	value: Ref<T>,
	errors: ConstRef<Vec<String>>,
	is_valid: Rc<dyn Fn() -> bool>,
}

impl<T> Clone for Value<T> {
	fn clone(&self) -> Self {
		Value {
			value: self.value.clone(),
			errors: self.errors.clone(),
			is_valid: self.is_valid.clone(),
		}
	}
}

impl<T> Value<T>
where
	T: Clone + PartialEq + 'static,
{
	/// A value that is always valid.
	pub fn new(value: Ref<T>, errors: ConstRef<Vec<String>>) -> Self {
		Value {
			value,
			errors,
			is_valid: Rc::new(|| true),
		}
	}

	/// Binds to the field at `path` inside the model behind `root`.
	///
	/// While the field is absent, reads give `default` and the value is
	/// invalid. Writes go through [`Modifiable::modify`]; `notifier` is
	/// signalled after every write that was not a no-op.
	pub fn at<Root>(
		root: Ref<Root>,
		path: Path<Root, T>,
		default: T,
		notifier: Option<Rc<dyn ChangeNotifier>>,
	) -> Self
	where
		Root: Modifiable,
	{
		let value = Ref::new(
			{
				let root = root.clone();
				let path = path.clone();
				move || path.get(&root.get()).unwrap_or_else(|| default.clone())
			},
			{
				let root = root.clone();
				let path = path.clone();
				move |value| commit(&root, &path, value, notifier.as_deref())
			},
		);
		Self::bound(root, path, value)
	}

	/// Like [`Value::at`] for an optional field. A field holding `None`
	/// also reads as `default`, but stays valid.
	pub fn at_optional<Root>(
		root: Ref<Root>,
		path: Path<Root, Option<T>>,
		default: T,
		notifier: Option<Rc<dyn ChangeNotifier>>,
	) -> Self
	where
		Root: Modifiable,
	{
		let value = Ref::new(
			{
				let root = root.clone();
				let path = path.clone();
				move || {
					path.get(&root.get())
						.flatten()
						.unwrap_or_else(|| default.clone())
				}
			},
			{
				let root = root.clone();
				let path = path.clone();
				move |value| commit(&root, &path, Some(value), notifier.as_deref())
			},
		);
		Self::bound(root, path, value)
	}

	fn bound<Root, V>(root: Ref<Root>, path: Path<Root, V>, value: Ref<T>) -> Self
	where
		Root: Modifiable,
		V: 'static,
	{
		let errors = {
			let root = root.clone();
			let path = path.clone();
			ConstRef::new(move || root.get().error_bag().messages(path.key()))
		};
		Value {
			value,
			errors,
			is_valid: Rc::new(move || !path.is_nil(&root.get())),
		}
	}

	#[inline]
	pub fn get(&self) -> T {
		self.value.get()
	}

	/// Writes `value` and reports whether the value read back differs from
	/// the one before the write.
	pub fn set(&self, value: T) -> bool {
		let before = self.value.get();
		self.value.set(value);
		self.value.get() != before
	}

	pub fn errors(&self) -> Vec<String> {
		self.errors.get()
	}

	pub fn is_valid(&self) -> bool {
		(self.is_valid)()
	}

	pub fn value_ref(&self) -> &Ref<T> {
		&self.value
	}

	pub fn errors_ref(&self) -> &ConstRef<Vec<String>> {
		&self.errors
	}
}

fn commit<Root, V>(root: &Ref<Root>, path: &Path<Root, V>, value: V, notifier: Option<&dyn ChangeNotifier>)
where
	Root: Modifiable,
	V: Clone + PartialEq + 'static,
{
	let mut model = root.get();
	match model.modify(path, value) {
		Ok(false) => {
			tracing::debug!(path = path.key(), "suppressed no-op write");
			return;
		}
		Ok(true) => {}
		Err(ModifyError::Absent { .. }) => {
			tracing::debug!(path = path.key(), "suppressed write to absent field");
			return;
		}
		Err(error @ ModifyError::Invalid { .. }) => {
			if root.get().error_bag().errors(path.key()) == model.error_bag().errors(path.key()) {
				tracing::debug!(%error, "suppressed repeated rejection");
				return;
			}
			tracing::debug!(%error, "write rejected");
		}
	}
	root.set(model);
	if let Some(notifier) = notifier {
		notifier.send();
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::Value;
	use crate::model::{ErrorBag, Modifiable, Path};
	use crate::{ChangeNotifier, ConstRef, Ref};

	#[derive(Clone, Default)]
	struct Line {
		enabled: Option<bool>,
		hidden: Option<Option<bool>>,
		locked: bool,
		errors: ErrorBag,
	}

	impl Modifiable for Line {
		fn error_bag(&self) -> &ErrorBag {
			&self.errors
		}

		fn error_bag_mut(&mut self) -> &mut ErrorBag {
			&mut self.errors
		}

		fn validate(&self, path: &str) -> Result<(), String> {
			if path == "enabled" && self.locked && self.enabled == Some(true) {
				return Err("line is locked".into());
			}
			Ok(())
		}
	}

	fn enabled() -> Path<Line, bool> {
		Path::new(
			"enabled",
			|l: &Line| l.enabled,
			|l: &mut Line, v| match &mut l.enabled {
				Some(slot) => {
					*slot = v;
					true
				}
				None => false,
			},
		)
	}

	fn hidden() -> Path<Line, Option<bool>> {
		Path::new(
			"hidden",
			|l: &Line| l.hidden,
			|l: &mut Line, v| match &mut l.hidden {
				Some(slot) => {
					*slot = v;
					true
				}
				None => false,
			},
		)
	}

	fn counter() -> (Rc<Cell<usize>>, Rc<dyn ChangeNotifier>) {
		let count = Rc::new(Cell::new(0));
		let notifier = {
			let count = count.clone();
			Rc::new(move || count.set(count.get() + 1)) as Rc<dyn ChangeNotifier>
		};
		(count, notifier)
	}

	#[test]
	fn absent_field_reads_default_and_is_invalid() {
		let root = Ref::copying(Line::default());
		let value = Value::at(root, enabled(), true, None);

		assert!(value.get());
		assert!(!value.is_valid());
		assert!(value.errors().is_empty());
	}

	#[test]
	fn write_notifies_only_on_change() {
		let root = Ref::copying(Line {
			enabled: Some(false),
			..Default::default()
		});
		let (count, notifier) = counter();
		let value = Value::at(root.clone(), enabled(), false, Some(notifier));

		assert!(value.is_valid());
		assert!(!value.set(false));
		assert_eq!(count.get(), 0);

		assert!(value.set(true));
		assert_eq!(count.get(), 1);
		assert_eq!(root.get().enabled, Some(true));
	}

	#[test]
	fn rejected_write_surfaces_errors() {
		let root = Ref::copying(Line {
			enabled: Some(false),
			locked: true,
			..Default::default()
		});
		let (count, notifier) = counter();
		let value = Value::at(root.clone(), enabled(), false, Some(notifier));

		assert!(!value.set(true));
		assert!(!value.get());
		assert_eq!(value.errors(), vec!["line is locked".to_string()]);
		assert_eq!(count.get(), 1);

		assert!(!value.set(true));
		assert_eq!(value.errors(), vec!["line is locked".to_string()]);
		assert_eq!(count.get(), 1);

		root.update(|line| line.locked = false);
		assert!(value.set(true));
		assert!(value.errors().is_empty());
	}

	#[test]
	fn write_to_absent_field_is_silent() {
		let root = Ref::copying(Line::default());
		let (count, notifier) = counter();
		let value = Value::at(root.clone(), enabled(), false, Some(notifier));

		assert!(!value.set(true));
		assert!(!value.set(true));
		assert_eq!(count.get(), 0);
		assert!(root.get().errors.is_empty());
	}

	#[test]
	fn optional_field_falls_back_to_default() {
		let root = Ref::copying(Line {
			hidden: Some(None),
			..Default::default()
		});
		let value = Value::at_optional(root.clone(), hidden(), false, None);

		assert!(!value.get());
		assert!(value.is_valid());

		assert!(value.set(true));
		assert_eq!(root.get().hidden, Some(Some(true)));

		root.update(|line| line.hidden = None);
		assert!(!value.get());
		assert!(!value.is_valid());
	}

	#[test]
	fn unbound_value_is_always_valid() {
		let value = Value::new(Ref::copying(3), ConstRef::copying(vec!["odd".to_string()]));
		assert!(value.is_valid());
		assert_eq!(value.errors(), vec!["odd".to_string()]);
		assert!(value.set(4));
		assert_eq!(value.get(), 4);
	}
}
