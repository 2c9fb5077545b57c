//! Reference interpreter for compiled locales.
//!
//! Evaluates lowered guards directly, mirroring the declarations and arm
//! order of generated code. Used to verify sample annexes and to classify
//! values without generating code first.

mod evaluate;
mod verify;

pub use verify::SampleMismatch;
