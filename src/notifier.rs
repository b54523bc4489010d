/// Receives a signal after the model behind a binding changed.
pub trait ChangeNotifier {
	fn send(&self);
}

impl<F> ChangeNotifier for F
where
	F: Fn(),
{
	fn send(&self) {
		self()
	}
}
