pub(crate) mod cpu;
pub(crate) mod layout;
pub(crate) mod pipeline;
