use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::{Rc, Weak};

use crate::widget::{Switch, Widget};

type StateCallback<W> = Rc<dyn Fn(&View<W>, &<W as Widget>::State)>;

/// Wraps a widget and reports its state changes through a single callback
/// slot.
///
/// The slot fires both for [`View::set_state`] and for changes the user
/// makes through the widget itself.
pub struct View<W: Widget> {
	body: Rc<ViewBody<W>>,
}

pub struct ViewBody<W: Widget> {
	widget: W,
	on_state_change: RefCell<Option<StateCallback<W>>>,
}

impl<W: Widget> Clone for View<W> {
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

impl<W: Widget> View<W> {
	pub fn new(widget: W) -> Self {
		let body = Rc::new(ViewBody {
			widget,
			on_state_change: RefCell::new(None),
		});

		let this = Rc::downgrade(&body);
		body.widget.connect_state_set(Box::new(move |state: &W::State| {
			if let Some(body) = this.upgrade() {
				View { body }.report(state);
			}
		}));

		View { body }
	}

	pub fn widget(&self) -> &W {
		&self.body.widget
	}

	#[inline]
	pub fn state(&self) -> W::State {
		self.body.widget.state()
	}

	/// Shows `state` on the widget and reports it.
	///
	/// Setting the state already shown is a no-op and reports nothing.
	pub fn set_state(&self, state: W::State) {
		if self.state() == state {
			return;
		}
		self.body.widget.set_state(state.clone());
		self.report(&state);
	}

	/// Installs the change callback, replacing any previous one.
	pub fn on_state_change(&self, callback: impl Fn(&View<W>, &W::State) + 'static) {
		*self.body.on_state_change.borrow_mut() = Some(Rc::new(callback));
	}

	pub fn downgrade(&self) -> WeakView<W> {
		WeakView {
			body: Rc::downgrade(&self.body),
		}
	}

	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.body, &other.body)
	}

	fn report(&self, state: &W::State) {
		tracing::trace!(target: "binding::view", "view state changed");
		let callback = self.body.on_state_change.borrow().clone();
		if let Some(callback) = callback {
			callback(self, state);
		}
	}
}

pub type BoolView = View<Switch>;

impl View<Switch> {
	pub fn with_state(state: bool) -> Self {
		View::new(Switch::new(state))
	}
}

impl Default for View<Switch> {
	fn default() -> Self {
		View::with_state(false)
	}
}

impl<W> Debug for View<W>
where
	W: Widget + Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("View").field("widget", &self.body.widget).finish()
	}
}

pub struct WeakView<W: Widget> {
	body: Weak<ViewBody<W>>,
}

impl<W: Widget> Clone for WeakView<W> {
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

impl<W: Widget> WeakView<W> {
	pub fn upgrade(&self) -> Option<View<W>> {
		self.body.upgrade().map(|body| View { body })
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::BoolView;
	use crate::widget::Widget;

	#[test]
	fn initial_state() {
		assert!(BoolView::with_state(true).state());
		assert!(!BoolView::default().state());
	}

	#[test]
	fn widget_and_view_agree() {
		let view = BoolView::default();
		assert_eq!(view.widget().state(), view.state());

		view.widget().activate(true);
		assert!(view.state());
		assert!(view.widget().is_active());

		view.widget().activate(false);
		assert!(!view.state());
	}

	#[test]
	fn callback_fires_on_set_state_and_user_input() {
		let view = BoolView::default();
		let reported = Rc::new(RefCell::new(Vec::new()));
		view.on_state_change({
			let reported = reported.clone();
			move |v, state| reported.borrow_mut().push((v.clone(), *state))
		});

		view.set_state(true);
		view.set_state(true);
		view.widget().activate(false);

		let reported = reported.borrow();
		assert_eq!(reported.len(), 2);
		assert!(reported[0].0.ptr_eq(&view));
		assert!(reported[0].1);
		assert!(!reported[1].1);
	}
}
