//! Helper macro generating port error enums with snake-case constructors.
//!
//! Each variant gets a `thiserror` message and a constructor whose fields
//! accept `impl Into<T>`, so adapters can write
//! `RecipeRepositoryError::query("boom")`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
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
                $variant $( { $($field : $ty),* } )?,
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
    define_port_error! {
        pub enum PantryPortError {
            Offline => "pantry offline",
            Lookup { message: String } => "lookup failed: {message}",
            Shelf { shelf: u32 } => "shelf {shelf} missing",
            Mixed { message: String, shelf: u32 } => "{message} on shelf {shelf}",
        }
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(PantryPortError::offline().to_string(), "pantry offline");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = PantryPortError::lookup("no flour");
        assert_eq!(err.to_string(), "lookup failed: no flour");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        assert_eq!(PantryPortError::shelf(3_u32).to_string(), "shelf 3 missing");
        assert_eq!(
            PantryPortError::mixed("no sugar", 4_u32).to_string(),
            "no sugar on shelf 4"
        );
    }
}
