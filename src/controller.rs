use crate::macros::enclose;

use crate::widget::{Switch, Widget};
use crate::{View, ViewModel};

/// Keeps a view and a view model showing the same value.
///
/// Construction pushes the view model's value into the view and then takes
/// over the change slot of both sides. Each side ignores writes of the
/// value it already holds, so a change bounces at most once before it
/// settles. When the model refuses a value entered in the view, the view
/// is put back to the model's value. The callbacks hold weak handles;
/// dropping the last handle to either side ends the binding.
pub struct Controller<W: Widget> {
	view_model: ViewModel<W::State>,
	view: View<W>,
}

impl<W: Widget> Controller<W> {
	pub fn new(view_model: ViewModel<W::State>, view: View<W>) -> Self {
		let _span = tracing::debug_span!("bind", label = view_model.label()).entered();

		// Seeding goes straight to the widget so no callback fires.
		view.widget().set_state(view_model.get());

		let weak_view_model = view_model.downgrade();
		view.on_state_change(enclose!((weak_view_model) move |view: &View<W>, state: &W::State| {
			if let Some(view_model) = weak_view_model.upgrade() {
				tracing::trace!("view -> view model");
				view_model.set(state.clone());
				// A refused write leaves the model as it was; show that.
				let value = view_model.get();
				if view.state() != value {
					view.set_state(value);
				}
			}
		}));

		let weak_view = view.downgrade();
		view_model.on_value_change(enclose!((weak_view) move |_: &ViewModel<W::State>, value: &W::State| {
			if let Some(view) = weak_view.upgrade() {
				tracing::trace!("view model -> view");
				view.set_state(value.clone());
			}
		}));

		Controller { view_model, view }
	}

	pub fn view_model(&self) -> &ViewModel<W::State> {
		&self.view_model
	}

	pub fn view(&self) -> &View<W> {
		&self.view
	}
}

pub type BoolViewController = Controller<Switch>;
