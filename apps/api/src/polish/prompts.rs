//! Prompts for the answer polisher.

pub const POLISH_SYSTEM: &str = "You polish interview answers. You return only the rewritten \
answer with no preamble, no quotes, and no commentary.";

pub const POLISH_PROMPT_TEMPLATE: &str = "Polish this interview answer to be professional and \
concise. Preserve all facts, skills, and metrics exactly as given. Do not add new numbers, \
names, or identifying details of any kind.\n\nAnswer:\n{answer}";
