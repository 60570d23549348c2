pub mod carousel;
pub mod pointer;
