//! Macros for declaring identifier enums.

/// Generate an enum usable as a status or action identifier.
///
/// Adds the derives the identifier traits need plus a `Display`
/// implementation. A variant displays as its own name unless an explicit
/// label is given with `=>`.
///
/// # Example
///
/// ```
/// use lite_sm::ident_enum;
///
/// ident_enum! {
///     pub enum Color {
///         Red => "red",
///         Yellow => "yellow",
///         Green => "green",
///     }
/// }
///
/// ident_enum! {
///     enum Phase {
///         Draft,
///         Review,
///     }
/// }
///
/// assert_eq!(Color::Red.to_string(), "red");
/// assert_eq!(Phase::Review.to_string(), "Review");
/// ```
#[macro_export]
macro_rules! ident_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(=> $label:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Debug, serde::Serialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let label = match self {
                    $(Self::$variant => $crate::ident_enum!(@label $variant $(=> $label)?)),*
                };
                f.write_str(label)
            }
        }
    };
    (@label $variant:ident) => {
        stringify!($variant)
    };
    (@label $variant:ident => $label:literal) => {
        $label
    };
}
