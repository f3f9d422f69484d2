//! Domain values consumed by the request encoders.
//!
//! These are plain data holders. Apart from the wire codes of their enums
//! they carry no gateway logic: what gets emitted, and in which order, is
//! decided in [`crate::encode`].

/// Declares a closed enum whose variants map to fixed wire codes.
macro_rules! wire_codes {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $repr:ty {
            $( $(#[$vmeta:meta])* $variant:ident = $code:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// All variants, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the wire code.
            #[must_use]
            pub const fn code(self) -> $repr {
                match self {
                    $(Self::$variant => $code),+
                }
            }

            /// Looks up a variant by wire code.
            #[must_use]
            pub fn from_code<C: PartialEq<$repr>>(code: C) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| code == v.code())
            }
        }

        impl cardgate_proto::FormValue for $name {
            fn form_value(&self) -> std::borrow::Cow<'_, str> {
                std::borrow::Cow::Owned(self.code().to_string())
            }
        }
    };
}

mod card;
mod indicator;
mod lodging;
mod merchant;
mod periodic;
mod profile;
mod verification;

pub use card::*;
pub use indicator::*;
pub use lodging::*;
pub use merchant::*;
pub use periodic::*;
pub use profile::*;
pub use verification::*;
