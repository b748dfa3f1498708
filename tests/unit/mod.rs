//! Unit tests mirroring the `src` module tree

#![allow(missing_docs)]

pub mod io;
