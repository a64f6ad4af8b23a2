/// Registers a record's field table and generates its [`Layered`](crate::Layered) impl.
///
/// Each entry lists a field name and its primitive type, optionally followed
/// by annotations. Entries typed `embedded` name an embedded sub-record,
/// which is kept in the table but never resolved.
///
/// ```
/// use tierconf_sdk::{layered, Layered};
///
/// #[derive(Debug, Default)]
/// struct Base {
///     region: String,
/// }
///
/// #[derive(Debug, Default)]
/// struct Service {
///     host: String,
///     port: u16,
///     debug: bool,
///     base: Base,
/// }
///
/// layered! {
///     Service {
///         host: String { default = "localhost" },
///         port: u16 { default = "8080", env = "SERVICE_PORT", arg = "port" },
///         debug: bool,
///         base: embedded,
///     }
/// }
///
/// assert_eq!(Service::descriptors().len(), 4);
/// ```
#[macro_export]
macro_rules! layered {
    (
        $record:ident {
            $(
                $field:ident : $kind:ident
                $( { $( $key:ident = $value:literal ),* $(,)? } )?
            ),* $(,)?
        }
    ) => {
        impl $crate::Layered for $record {
            fn record_name() -> &'static str {
                stringify!($record)
            }

            fn descriptors() -> ::std::vec::Vec<$crate::FieldDescriptor> {
                ::std::vec![
                    $(
                        $crate::__layered_descriptor!(
                            $field, $kind; $( $( $key = $value ),* )?
                        )
                    ),*
                ]
            }

            fn field_slot(&mut self, name: &str) -> ::std::option::Option<$crate::FieldSlot<'_>> {
                $(
                    if name == stringify!($field) {
                        return $crate::__layered_slot!(self.$field, $kind);
                    }
                )*
                ::std::option::Option::None
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __layered_descriptor {
    ($field:ident, embedded; ) => {
        $crate::FieldDescriptor::embedded(stringify!($field))
    };
    ($field:ident, $ty:ident; $( $key:ident = $value:literal ),*) => {
        $crate::__layered_annotate!(
            $crate::FieldDescriptor::new(
                stringify!($field),
                <$ty as $crate::Primitive>::KIND,
            );
            $( $key = $value ),*
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __layered_annotate {
    ($desc:expr; ) => {
        $desc
    };
    ($desc:expr; default = $value:literal $(, $($rest:tt)*)?) => {
        $crate::__layered_annotate!($desc.with_default($value); $($($rest)*)?)
    };
    ($desc:expr; env = $value:literal $(, $($rest:tt)*)?) => {
        $crate::__layered_annotate!($desc.with_env($value); $($($rest)*)?)
    };
    ($desc:expr; arg = $value:literal $(, $($rest:tt)*)?) => {
        $crate::__layered_annotate!($desc.with_arg($value); $($($rest)*)?)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __layered_slot {
    ($place:expr, embedded) => {
        ::std::option::Option::None
    };
    ($place:expr, $ty:ident) => {
        ::std::option::Option::Some($crate::Primitive::slot(&mut $place))
    };
}
