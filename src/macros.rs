pub use enclose::*;

/// Builds a [`Path`](crate::model::Path) to a field that is always present.
///
/// ```
/// # use binding::path;
/// #[derive(Clone)]
/// struct Line { style: Style }
/// #[derive(Clone)]
/// struct Style { dashed: bool }
///
/// let dashed = path!(Line => style.dashed);
/// assert_eq!(dashed.key(), "style.dashed");
/// ```
#[macro_export]
macro_rules! path {
	($root:ty => $first:ident $(. $rest:ident)*) => {
		$crate::model::Path::new(
			concat!(stringify!($first) $(, ".", stringify!($rest))*),
			|root: &$root| Some(root.$first $(.$rest)*.clone()),
			|root: &mut $root, value| {
				root.$first $(.$rest)* = value;
				true
			},
		)
	};
}
