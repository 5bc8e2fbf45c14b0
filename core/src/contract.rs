//! Contract declarations.
//!
//! # Design
//! A contract is a zero-sized marker type implementing [`Contract`]. Its three
//! associated types are the only information client and server share. Fields
//! an operation does not have are spelled [`Absent`], which the `contract!`
//! macro fills in automatically so declarations only name what exists.

use std::fmt;
use std::marker::PhantomData;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The shapes exchanged by one API operation.
///
/// Implement this on a marker type (usually through [`contract!`]) and hand
/// the marker to [`ClientContract`](crate::ClientContract) and
/// [`ApiContract`](crate::ApiContract). A type that does not implement
/// `Contract` cannot be used with either, which is the only way a contract
/// can be rejected.
pub trait Contract {
    /// Data carried out-of-band with the request, e.g. routing identifiers.
    type RequestParams;
    /// Data carried in the request payload.
    type RequestBody;
    /// Data returned by the operation.
    type ResponseBody;
}

/// "This operation has no such element."
///
/// Contributes no keys to a [`Merged`](crate::Merged) input, serializes as
/// `null` and accepts any input when deserialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Absent;

impl Serialize for Absent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_unit()
    }
}

impl<'de> Deserialize<'de> for Absent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer)?;
        Ok(Absent)
    }
}

/// A contract composed inline from explicit field types.
///
/// Useful when an operation is not worth naming:
/// `ClientRequest<Inline<UsernameParams, Absent, User>>`.
pub struct Inline<P = Absent, B = Absent, R = Absent>(PhantomData<fn() -> (P, B, R)>);

impl<P, B, R> Contract for Inline<P, B, R> {
    type RequestParams = P;
    type RequestBody = B;
    type ResponseBody = R;
}

impl<P, B, R> Default for Inline<P, B, R> {
    fn default() -> Self {
        Inline(PhantomData)
    }
}

impl<P, B, R> fmt::Debug for Inline<P, B, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Inline")
    }
}

/// Declare a contract marker type.
///
/// Any of `request_params`, `request_body` and `response_body` may be given,
/// in any order, each at most once. Omitted fields become [`Absent`].
///
/// ```
/// use contract_core::{contract, Absent, Contract};
///
/// contract! {
///     /// DELETE /item/{id}
///     pub DeleteItem {
///         request_params: u64,
///     }
/// }
///
/// fn response_of<C: Contract>() -> &'static str {
///     std::any::type_name::<C::ResponseBody>()
/// }
/// assert_eq!(response_of::<DeleteItem>(), std::any::type_name::<Absent>());
/// ```
///
/// Fields outside the three above are rejected:
///
/// ```compile_fail
/// use contract_core::contract;
///
/// contract! {
///     X {
///         foo: u8,
///     }
/// }
/// ```
///
/// So is naming a field twice:
///
/// ```compile_fail
/// use contract_core::contract;
///
/// contract! {
///     X {
///         request_params: u8,
///         response_body: String,
///         request_params: u16,
///     }
/// }
/// ```
#[macro_export]
macro_rules! contract {
    (@pick $want:ident;) => { $crate::Absent };
    (@pick request_params; request_params: $t:ty $(, $f:ident: $r:ty)*) => {
        $crate::contract!(@once request_params $t; $($f: $r),*)
    };
    (@pick request_body; request_body: $t:ty $(, $f:ident: $r:ty)*) => {
        $crate::contract!(@once request_body $t; $($f: $r),*)
    };
    (@pick response_body; response_body: $t:ty $(, $f:ident: $r:ty)*) => {
        $crate::contract!(@once response_body $t; $($f: $r),*)
    };
    (@pick $want:ident; request_params: $t:ty $(, $f:ident: $r:ty)*) => {
        $crate::contract!(@pick $want; $($f: $r),*)
    };
    (@pick $want:ident; request_body: $t:ty $(, $f:ident: $r:ty)*) => {
        $crate::contract!(@pick $want; $($f: $r),*)
    };
    (@pick $want:ident; response_body: $t:ty $(, $f:ident: $r:ty)*) => {
        $crate::contract!(@pick $want; $($f: $r),*)
    };
    (@once $want:ident $t:ty;) => { $t };
    (@once request_params $t:ty; request_params: $($rest:tt)*) => {
        compile_error!("`request_params` is declared more than once")
    };
    (@once request_body $t:ty; request_body: $($rest:tt)*) => {
        compile_error!("`request_body` is declared more than once")
    };
    (@once response_body $t:ty; response_body: $($rest:tt)*) => {
        compile_error!("`response_body` is declared more than once")
    };
    (@once $want:ident $t:ty; request_params: $r:ty $(, $f:ident: $x:ty)*) => {
        $crate::contract!(@once $want $t; $($f: $x),*)
    };
    (@once $want:ident $t:ty; request_body: $r:ty $(, $f:ident: $x:ty)*) => {
        $crate::contract!(@once $want $t; $($f: $x),*)
    };
    (@once $want:ident $t:ty; response_body: $r:ty $(, $f:ident: $x:ty)*) => {
        $crate::contract!(@once $want $t; $($f: $x),*)
    };
    ($(#[$meta:meta])* $vis:vis $name:ident { $($field:ident: $ty:ty),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $name;

        impl $crate::Contract for $name {
            type RequestParams = $crate::contract!(@pick request_params; $($field: $ty),*);
            type RequestBody = $crate::contract!(@pick request_body; $($field: $ty),*);
            type ResponseBody = $crate::contract!(@pick response_body; $($field: $ty),*);
        }
    };
}
