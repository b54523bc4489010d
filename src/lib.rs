//! Observable references and view/view-model bindings.
//!
//! [`ConstRef`] and [`Ref`] are handles to values that live inside some
//! larger structure, reached through accessor functions rather than
//! pointers. [`Value`] pairs a reference with the validation state an
//! editable model keeps for it. [`ViewModel`], [`View`] and [`Controller`]
//! keep a widget and a model value showing the same thing.
//!
//! Everything here is single-threaded and synchronous: a write runs every
//! callback it triggers before it returns.

pub mod macros;
pub mod model;

mod controller;
mod lens;
mod notifier;
mod r#const;
mod r#ref;
mod subscribers;
mod value;
mod view;
mod view_model;
mod widget;

pub use controller::{BoolViewController, Controller};
pub use lens::{lens, FnLens, Index, Lens, LensExt, Then};
pub use notifier::ChangeNotifier;
pub use r#const::ConstRef;
pub use r#ref::{Ref, Toggle};
pub use subscribers::{Subscribers, Subscription};
pub use value::Value;
pub use view::{BoolView, View, WeakView};
pub use view_model::{BoolViewModel, ViewModel, WeakViewModel};
pub use widget::{Switch, Widget};
