use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// The contract a host toolkit widget fulfils to be driven by a [`View`].
///
/// `set_state` changes the displayed state without reporting it back.
/// Changes made by the user are reported to the handler installed with
/// `connect_state_set`, after the widget has taken the new state.
///
/// [`View`]: crate::View
pub trait Widget: 'static {
	type State: Clone + PartialEq + 'static;

	fn state(&self) -> Self::State;
	fn set_state(&self, state: Self::State);
	fn connect_state_set(&self, handler: Box<dyn Fn(&Self::State)>);
}

/// A headless on/off switch.
#[derive(Default)]
pub struct Switch {
	state: Cell<bool>,
	handler: RefCell<Option<Rc<dyn Fn(&bool)>>>,
}

impl Switch {
	pub fn new(state: bool) -> Self {
		Switch {
			state: Cell::new(state),
			handler: RefCell::new(None),
		}
	}

	pub fn is_active(&self) -> bool {
		self.state.get()
	}

	/// Flips the switch to `state` as a user would.
	pub fn activate(&self, state: bool) {
		if self.state.replace(state) == state {
			return;
		}
		let handler = self.handler.borrow().clone();
		if let Some(handler) = handler {
			handler(&state);
		}
	}
}

impl Widget for Switch {
	type State = bool;

	fn state(&self) -> bool {
		self.state.get()
	}

	fn set_state(&self, state: bool) {
		self.state.set(state)
	}

	fn connect_state_set(&self, handler: Box<dyn Fn(&bool)>) {
		*self.handler.borrow_mut() = Some(Rc::from(handler));
	}
}

impl std::fmt::Debug for Switch {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Switch").field("state", &self.state.get()).finish()
	}
}
