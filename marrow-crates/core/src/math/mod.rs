pub(crate) mod interval;
pub(crate) mod num_ext;

pub use interval::Interval;
pub use interval::HORIZON;
pub(crate) use num_ext::NumExt;
