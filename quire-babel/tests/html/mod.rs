//! HTML serializer tests

mod escaping;
mod export;
mod table;
