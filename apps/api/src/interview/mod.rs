// Interview preparation: question synthesis, templated sample answers, and
// the answer coach. Deterministic given identical sanitized input.

pub mod answers;
pub mod coach;
pub mod handlers;
pub mod questions;
