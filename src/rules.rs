//! Script-specific rule tables.
//!
//! Each family exposes a `get` function returning its ordered rule list; the
//! engine compiles and caches the result per table key.

pub(crate) mod cjk;
pub(crate) mod french;
