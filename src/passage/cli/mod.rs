//! Terminal output for the binary. Nothing here is part of the library API.

pub mod print;
