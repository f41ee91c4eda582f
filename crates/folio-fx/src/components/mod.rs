pub mod phrases;
pub mod pointer;
pub mod reveal;
pub mod typewriter;
