use crate::internal::Sealed;

macro_rules! markers {
    { $( $( #[$meta:meta] )* $ident:ident, )* } => {$(
        $( #[$meta] )*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $ident;
        impl Sealed for $ident {}
        impl Marker for $ident {}
    )*};
}

markers! {
    AnyMarker,
    /// Users are owned by the account service, we only read them.
    UserMarker,
    PostMarker,
    /// Comments live inside their post document.
    CommentMarker,
}

/// This trait represents a marker restricting all objects to
/// from using it as a generic in [Id] object.
///
/// [Id]: super::Id
pub trait Marker: Sealed {}
