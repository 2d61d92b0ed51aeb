pub mod sort;
pub mod util;
