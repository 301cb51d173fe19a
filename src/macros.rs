// src/macros.rs

/// `String` from anything `String::from` accepts. Used for names and ids
/// copied out of borrowed feed data: `s!(id)`, `s!(UNKNOWN_TERRITORY)`.
/// With no argument it is an empty `String`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}
