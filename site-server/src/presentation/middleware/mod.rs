pub(crate) mod cors;
pub(crate) mod gate;
pub(crate) mod trace;
