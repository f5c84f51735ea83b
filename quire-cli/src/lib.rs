//! Library half of the quire CLI, shared by the binary and its tests.

pub mod transforms;
