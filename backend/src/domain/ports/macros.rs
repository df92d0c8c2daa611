//! Defines helper macros for generating domain port error enums.
//!
//! Every driven port reports failures through a small enum whose variants
//! carry a message. The macro derives `thiserror::Error` and adds one
//! snake-case constructor per variant so adapters can write
//! `StaffDirectoryError::connection("pool closed")`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Build the `", stringify!($variant), "` variant.")]
            #[must_use]
            pub const fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Build the `", stringify!($variant), "` variant.")]
            #[must_use]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( {
                    $(
                        #[doc = concat!("`", stringify!($field), "` reported by the adapter.")]
                        $field : $ty
                    ),*
                } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        /// Error used to exercise the macro.
        pub enum LookupError {
            /// Backend offline.
            Offline => "lookup backend offline",
            /// Backend refused the query.
            Refused { message: String } => "lookup refused: {message}",
            /// Too many ids requested.
            TooMany { requested: usize, limit: usize } =>
                "requested {requested} ids, limit is {limit}",
        }
    }

    #[test]
    fn unit_variant_gets_constructor() {
        assert_eq!(LookupError::offline(), LookupError::Offline);
        assert_eq!(LookupError::offline().to_string(), "lookup backend offline");
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = LookupError::refused("bad id");
        assert_eq!(err.to_string(), "lookup refused: bad id");
    }

    #[test]
    fn constructors_support_several_fields() {
        let err = LookupError::too_many(12_usize, 10_usize);
        assert_eq!(err.to_string(), "requested 12 ids, limit is 10");
    }
}
